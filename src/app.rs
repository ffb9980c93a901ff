//! Application state and logic.

use std::str::FromStr;

use crate::config::ViewConfig;
use crate::data::{Dataset, DatasetLayout, GeoSlice};
use crate::error::Result;
use crate::render::ColorScale;

/// Application theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Gruvbox dark theme.
    #[default]
    GruvboxDark,
    /// Gruvbox light theme.
    GruvboxLight,
}

impl Theme {
    /// Get the next theme in the cycle.
    pub fn next(self) -> Self {
        match self {
            Theme::GruvboxDark => Theme::GruvboxLight,
            Theme::GruvboxLight => Theme::GruvboxDark,
        }
    }

    /// Get the theme name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::GruvboxDark => "Gruvbox Dark",
            Theme::GruvboxLight => "Gruvbox Light",
        }
    }
}

/// Which render of the slice is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Array-index raster.
    #[default]
    Raster,
    /// Plate Carree map with coastlines.
    Map,
}

impl ViewMode {
    /// Get the next view mode in cycle.
    pub fn next(self) -> Self {
        match self {
            ViewMode::Raster => ViewMode::Map,
            ViewMode::Map => ViewMode::Raster,
        }
    }

    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            ViewMode::Raster => "Raster",
            ViewMode::Map => "Map",
        }
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raster" | "plain" => Ok(ViewMode::Raster),
            "map" | "platecarree" | "plate-carree" => Ok(ViewMode::Map),
            other => Err(format!("unknown view '{}' (expected raster or map)", other)),
        }
    }
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Opened dataset.
    pub dataset: Dataset,
    /// Variable and dimension names in use.
    pub layout: DatasetLayout,
    /// Slice currently shown.
    pub slice: GeoSlice,
    /// Number of time steps available.
    pub time_len: usize,
    /// Color scale for both views.
    pub scale: ColorScale,
    /// Current view.
    pub view_mode: ViewMode,
    /// Whether the map view draws coastlines.
    pub coastlines: bool,
    /// Current theme.
    pub theme: Theme,
    /// Status message.
    pub status: String,
}

impl App {
    /// Create the application and select the configured time step.
    ///
    /// Fails when the first slice cannot be read, so a bad index or an
    /// unreachable source is reported before the terminal UI starts.
    pub fn new(dataset: Dataset, config: &ViewConfig) -> Result<Self> {
        let time_len = dataset.time_len(&config.layout)?;
        let slice = dataset.select_time(&config.layout, config.time_index)?;
        let status = format!("Loaded {}", slice.time);

        Ok(Self {
            dataset,
            layout: config.layout.clone(),
            slice,
            time_len,
            scale: config.scale,
            view_mode: config.view,
            coastlines: config.coastlines,
            theme: Theme::default(),
            status,
        })
    }

    /// Index of the slice on screen.
    pub fn time_index(&self) -> usize {
        self.slice.time.index
    }

    /// Switch between raster and map.
    pub fn cycle_view_mode(&mut self) {
        self.view_mode = self.view_mode.next();
        self.status = format!("View: {}", self.view_mode.name());
    }

    /// Cycle to next color palette.
    pub fn cycle_palette(&mut self) {
        let palette = self.scale.palette().next();
        self.scale = self.scale.with_palette(palette);
        self.status = format!("Palette: {}", palette.name());
    }

    /// Show or hide coastlines on the map.
    pub fn toggle_coastlines(&mut self) {
        self.coastlines = !self.coastlines;
        self.status = format!(
            "Coastlines {}",
            if self.coastlines { "on" } else { "off" }
        );
    }

    /// Cycle to the next theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.status = format!("Theme: {}", self.theme.name());
    }

    /// Step one month forward.
    pub fn next_month(&mut self) {
        let next = self.time_index() + 1;
        if next >= self.time_len {
            self.status = format!("Already at last month ({})", self.slice.time.month);
            return;
        }
        self.goto(next);
    }

    /// Step one month back.
    pub fn prev_month(&mut self) {
        match self.time_index().checked_sub(1) {
            Some(prev) => self.goto(prev),
            None => {
                self.status = format!("Already at first month ({})", self.slice.time.month);
            },
        }
    }

    /// Replace the slice with another time step. On failure the current
    /// slice stays and the error goes to the status line.
    pub fn goto(&mut self, index: usize) {
        match self.dataset.select_time(&self.layout, index) {
            Ok(slice) => {
                self.status = format!("Loaded {}", slice.time);
                self.slice = slice;
            },
            Err(e) => {
                tracing::warn!("Failed to select time {}: {}", index, e);
                self.status = format!("Error: {}", e);
            },
        }
    }
}

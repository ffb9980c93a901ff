//! Viewer configuration.

use crate::app::ViewMode;
use crate::data::{DatasetLayout, MonthIndex};
use crate::error::{Result, SstError};
use crate::render::{ColorPalette, ColorScale};

/// Everything needed to open a dataset and show the first slice.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    /// URL or path of the dataset.
    pub source: String,
    /// Variable and dimension names.
    pub layout: DatasetLayout,
    /// Time step shown first.
    pub time_index: usize,
    /// Color scale for both views.
    pub scale: ColorScale,
    /// View shown first.
    pub view: ViewMode,
    /// Whether the map view draws coastlines.
    pub coastlines: bool,
}

impl ViewConfig {
    /// September 2021 for a dataset starting January 1854.
    pub const DEFAULT_TIME_INDEX: usize = 2012;

    /// Defaults for a source: September 2021, 0 to 30 °C, raster view.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            layout: DatasetLayout::default(),
            time_index: Self::DEFAULT_TIME_INDEX,
            scale: ColorScale::default(),
            view: ViewMode::default(),
            coastlines: true,
        }
    }

    /// Set the first time step from either an index or a `YYYY-MM` month.
    /// A month takes precedence.
    pub fn with_time(mut self, index: Option<usize>, month: Option<&str>) -> Result<Self> {
        self.time_index = match (month, index) {
            (Some(month), _) => MonthIndex::parse(month)?,
            (None, Some(index)) => index,
            (None, None) => Self::DEFAULT_TIME_INDEX,
        };
        Ok(self)
    }

    /// Set the color scale bounds and palette.
    pub fn with_scale(mut self, vmin: f64, vmax: f64, palette: ColorPalette) -> Result<Self> {
        self.scale = ColorScale::new(vmin, vmax, palette)?;
        Ok(self)
    }

    /// Check the configuration before anything is opened.
    pub fn validate(&self) -> Result<()> {
        if self.source.trim().is_empty() {
            return Err(SstError::SourceNotFound {
                path: self.source.clone(),
            });
        }

        let names = [
            &self.layout.variable,
            &self.layout.time_dim,
            &self.layout.lat_dim,
            &self.layout.lon_dim,
        ];
        if names.iter().any(|n| n.trim().is_empty()) {
            return Err(SstError::layout(
                &self.layout.variable,
                "variable and dimension names must not be empty",
            ));
        }
        if self.layout.lat_dim == self.layout.lon_dim {
            return Err(SstError::layout(
                &self.layout.variable,
                "latitude and longitude dimensions must differ",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewConfig::new("sst.nc");
        assert_eq!(config.time_index, 2012);
        assert_eq!(config.scale.vmin(), 0.0);
        assert_eq!(config.scale.vmax(), 30.0);
        assert_eq!(config.view, ViewMode::Raster);
        assert_eq!(config.layout.variable, "sea_surface_temperature");
        assert!(config.coastlines);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_month_overrides_index() {
        let config = ViewConfig::new("sst.nc")
            .with_time(Some(5), Some("1854-03"))
            .unwrap();
        assert_eq!(config.time_index, 2);

        let config = ViewConfig::new("sst.nc").with_time(Some(5), None).unwrap();
        assert_eq!(config.time_index, 5);

        assert!(ViewConfig::new("sst.nc")
            .with_time(None, Some("1700-01"))
            .is_err());
    }

    #[test]
    fn test_invalid_scale() {
        let err = ViewConfig::new("sst.nc")
            .with_scale(30.0, 0.0, ColorPalette::Viridis)
            .unwrap_err();
        assert!(matches!(err, SstError::InvalidColorScale { .. }));
    }

    #[test]
    fn test_validate_names() {
        let mut config = ViewConfig::new("sst.nc");
        config.layout.lon_dim = "latitude".to_string();
        assert!(config.validate().is_err());

        let mut config = ViewConfig::new("sst.nc");
        config.layout.variable = " ".to_string();
        assert!(config.validate().is_err());

        assert!(ViewConfig::new("").validate().is_err());
    }
}

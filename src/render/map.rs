//! Geographic view: Plate Carree raster with a coastline overlay.

use super::{ColorScale, GridLookup};
use crate::data::GeoSlice;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Map, MapResolution, Points},
        Widget,
    },
};
use std::collections::HashMap;

/// Width of the latitude label gutter.
const LABEL_WIDTH: u16 = 4;

const LON_BOUNDS: [f64; 2] = [-180.0, 180.0];
const LAT_BOUNDS: [f64; 2] = [-90.0, 90.0];

/// Heatmap of a slice registered to longitude/latitude.
///
/// The canvas spans the whole globe with longitude and latitude mapped
/// linearly to columns and rows. Each half-block pixel takes the value of
/// the grid cell under its center, so the same slice values appear as in
/// [`super::RasterView`], only placed by coordinates instead of indices.
#[derive(Debug, Clone)]
pub struct MapView<'a> {
    slice: &'a GeoSlice,
    scale: &'a ColorScale,
    coastlines: bool,
    coastline_color: Color,
    label_style: Style,
}

impl<'a> MapView<'a> {
    /// Create a map view of a slice, with coastlines.
    pub fn new(slice: &'a GeoSlice, scale: &'a ColorScale) -> Self {
        Self {
            slice,
            scale,
            coastlines: true,
            coastline_color: Color::White,
            label_style: Style::default(),
        }
    }

    /// Draw or hide the coastline overlay.
    pub fn coastlines(mut self, enabled: bool) -> Self {
        self.coastlines = enabled;
        self
    }

    /// Coastline color.
    pub fn coastline_color(mut self, color: Color) -> Self {
        self.coastline_color = color;
        self
    }

    /// Style for axis labels.
    pub fn label_style(mut self, style: Style) -> Self {
        self.label_style = style;
        self
    }
}

/// Canvas size in cells for a 2:1 map that fits the given space.
///
/// Half-block pixels are about square, so a cell holds one pixel across and
/// two down, and a 360x180 degree map needs four times as many columns as rows.
pub fn fit_map(max_w: u16, max_h: u16) -> (u16, u16) {
    let height = max_h.min(max_w / 4);
    (height * 4, height)
}

/// Geographic center of a pixel, as (longitude, latitude).
pub fn pixel_center(px: usize, py: usize, width_px: usize, height_px: usize) -> (f64, f64) {
    let lon = LON_BOUNDS[0] + (px as f64 + 0.5) * 360.0 / width_px as f64;
    let lat = LAT_BOUNDS[1] - (py as f64 + 0.5) * 180.0 / height_px as f64;
    (lon, lat)
}

/// Canvas coordinate that the painter maps onto pixel (px, py).
///
/// The quarter-pixel offset lands on the same pixel whether the painter
/// truncates or rounds.
fn canvas_point(px: usize, py: usize, width_px: usize, height_px: usize) -> (f64, f64) {
    let x = LON_BOUNDS[0] + (px as f64 + 0.25) * 360.0 / (width_px - 1) as f64;
    let y = LAT_BOUNDS[1] - (py as f64 + 0.25) * 180.0 / (height_px - 1) as f64;
    (x.min(LON_BOUNDS[1]), y.max(LAT_BOUNDS[0]))
}

impl Widget for MapView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width <= LABEL_WIDTH || area.height < 2 {
            return;
        }

        let (width, height) = fit_map(area.width - LABEL_WIDTH, area.height - 1);
        if width < 2 || height < 1 {
            return;
        }

        let offset_x = (area.width - LABEL_WIDTH - width) / 2;
        let offset_y = (area.height - 1 - height) / 2;
        let canvas_area = Rect {
            x: area.x + LABEL_WIDTH + offset_x,
            y: area.y + offset_y,
            width,
            height,
        };

        let width_px = width as usize;
        let height_px = height as usize * 2;

        // Group pixels by color so each color is one draw call.
        let lookup = GridLookup::new(self.slice);
        let mut layers: HashMap<Color, Vec<(f64, f64)>> = HashMap::new();
        for py in 0..height_px {
            for px in 0..width_px {
                let (lon, lat) = pixel_center(px, py, width_px, height_px);
                let color = lookup
                    .sample(self.slice, lon, lat)
                    .and_then(|v| self.scale.color(v));
                if let Some(color) = color {
                    layers
                        .entry(color)
                        .or_default()
                        .push(canvas_point(px, py, width_px, height_px));
                }
            }
        }

        let coastlines = self.coastlines;
        let coastline_color = self.coastline_color;
        Canvas::default()
            .marker(Marker::HalfBlock)
            .x_bounds(LON_BOUNDS)
            .y_bounds(LAT_BOUNDS)
            .paint(|ctx| {
                for (color, coords) in &layers {
                    ctx.draw(&Points {
                        coords,
                        color: *color,
                    });
                }
                if coastlines {
                    ctx.draw(&Map {
                        resolution: MapResolution::High,
                        color: coastline_color,
                    });
                }
            })
            .render(canvas_area, buf);

        // Latitude labels on the left
        let lat_labels = [
            (canvas_area.y, " 90N"),
            (canvas_area.y + height / 2, "   0"),
            (canvas_area.y + height - 1, " 90S"),
        ];
        for (y, label) in lat_labels {
            buf.set_string(canvas_area.x - LABEL_WIDTH, y, label, self.label_style);
        }

        // Longitude labels below
        let label_y = canvas_area.y + height;
        if label_y < area.y + area.height {
            let right = "180E";
            buf.set_string(canvas_area.x, label_y, "180W", self.label_style);
            buf.set_string(canvas_area.x + width / 2, label_y, "0", self.label_style);
            buf.set_string(
                canvas_area.x + width.saturating_sub(right.len() as u16),
                label_y,
                right,
                self.label_style,
            );
        }
    }
}

//! Fixed color scale.

use super::ColorPalette;
use crate::error::{Result, SstError};
use ratatui::style::Color;

/// Maps data values onto a palette over a fixed range.
///
/// The range does not follow the data, so two slices rendered with the same
/// scale are directly comparable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    vmin: f64,
    vmax: f64,
    palette: ColorPalette,
}

impl ColorScale {
    /// Default lower bound, degrees Celsius.
    pub const DEFAULT_VMIN: f64 = 0.0;
    /// Default upper bound, degrees Celsius.
    pub const DEFAULT_VMAX: f64 = 30.0;
    /// Number of distinct colors a scale produces.
    pub const LEVELS: u32 = 256;

    /// Create a scale. Bounds must be finite with `vmin < vmax`.
    pub fn new(vmin: f64, vmax: f64, palette: ColorPalette) -> Result<Self> {
        if !vmin.is_finite() || !vmax.is_finite() || vmin >= vmax {
            return Err(SstError::InvalidColorScale { vmin, vmax });
        }
        Ok(Self { vmin, vmax, palette })
    }

    /// The 0 to 30 °C scale.
    pub fn celsius(palette: ColorPalette) -> Self {
        Self {
            vmin: Self::DEFAULT_VMIN,
            vmax: Self::DEFAULT_VMAX,
            palette,
        }
    }

    /// Lower bound.
    pub fn vmin(&self) -> f64 {
        self.vmin
    }

    /// Upper bound.
    pub fn vmax(&self) -> f64 {
        self.vmax
    }

    /// Palette in use.
    pub fn palette(&self) -> ColorPalette {
        self.palette
    }

    /// Same bounds, different palette.
    pub fn with_palette(self, palette: ColorPalette) -> Self {
        Self { palette, ..self }
    }

    /// Position of a value within the range, clamped to [0, 1].
    /// NaN has no position.
    pub fn normalize(&self, value: f64) -> Option<f64> {
        if value.is_nan() {
            return None;
        }
        Some(((value - self.vmin) / (self.vmax - self.vmin)).clamp(0.0, 1.0))
    }

    /// Color for a value, quantized to [`Self::LEVELS`] steps.
    pub fn color(&self, value: f64) -> Option<Color> {
        self.normalize(value).map(|t| self.palette.color(Self::quantize(t)))
    }

    /// Color at a normalized position, for drawing legends.
    pub fn color_at(&self, t: f64) -> Color {
        self.palette.color(Self::quantize(t.clamp(0.0, 1.0)))
    }

    fn quantize(t: f64) -> f64 {
        let top = (Self::LEVELS - 1) as f64;
        (t * top).round() / top
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::celsius(ColorPalette::default())
    }
}

//! Color palettes for heatmap rendering.

use ratatui::style::Color;
use std::str::FromStr;

/// Color palette for heatmap visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorPalette {
    /// Viridis colormap (perceptually uniform, colorblind-friendly).
    #[default]
    Viridis,
    /// Plasma colormap (perceptually uniform).
    Plasma,
    /// Rainbow/Spectral colormap (traditional, high contrast).
    Rainbow,
    /// Blue-White-Red diverging colormap.
    BlueRed,
}

impl ColorPalette {
    /// All palettes in cycle order.
    pub const ALL: [ColorPalette; 4] = [
        ColorPalette::Viridis,
        ColorPalette::Plasma,
        ColorPalette::Rainbow,
        ColorPalette::BlueRed,
    ];

    /// Get the next palette in cycle.
    pub fn next(self) -> Self {
        match self {
            Self::Viridis => Self::Plasma,
            Self::Plasma => Self::Rainbow,
            Self::Rainbow => Self::BlueRed,
            Self::BlueRed => Self::Viridis,
        }
    }

    /// Get palette name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Viridis => "Viridis",
            Self::Plasma => "Plasma",
            Self::Rainbow => "Rainbow",
            Self::BlueRed => "Blue-Red",
        }
    }

    /// Map a normalized value (0.0 to 1.0) to an RGB color.
    pub fn color(self, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Viridis => viridis_color(t),
            Self::Plasma => plasma_color(t),
            Self::Rainbow => rainbow_color(t),
            Self::BlueRed => bluered_color(t),
        }
    }
}

impl FromStr for ColorPalette {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "viridis" => Ok(Self::Viridis),
            "plasma" => Ok(Self::Plasma),
            "rainbow" | "spectral" => Ok(Self::Rainbow),
            "blue-red" | "bluered" | "bwr" => Ok(Self::BlueRed),
            other => Err(format!(
                "unknown palette '{}' (expected viridis, plasma, rainbow or blue-red)",
                other
            )),
        }
    }
}

/// Linear interpolation through three anchor channels, split at t = 0.5.
fn two_segment(t: f64, start: f64, mid: f64, end: f64) -> f64 {
    if t < 0.5 {
        start + t * 2.0 * (mid - start)
    } else {
        mid + (t - 0.5) * 2.0 * (end - mid)
    }
}

/// Viridis colormap approximation.
fn viridis_color(t: f64) -> Color {
    Color::Rgb(
        two_segment(t, 68.0, 33.0, 253.0) as u8,
        two_segment(t, 1.0, 144.0, 231.0) as u8,
        two_segment(t, 84.0, 140.0, 37.0) as u8,
    )
}

/// Plasma colormap approximation.
fn plasma_color(t: f64) -> Color {
    Color::Rgb(
        two_segment(t, 13.0, 204.0, 240.0) as u8,
        two_segment(t, 8.0, 71.0, 249.0) as u8,
        two_segment(t, 135.0, 120.0, 33.0) as u8,
    )
}

/// Rainbow colormap: hue sweeps from 240° (blue) to 0° (red).
fn rainbow_color(t: f64) -> Color {
    let h = (1.0 - t) * 240.0;
    let x = 1.0 - ((h / 60.0) % 2.0 - 1.0).abs();

    let (r, g, b) = if h < 60.0 {
        (1.0, x, 0.0)
    } else if h < 120.0 {
        (x, 1.0, 0.0)
    } else if h < 180.0 {
        (0.0, 1.0, x)
    } else {
        (0.0, x, 1.0)
    };

    Color::Rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

/// Blue-White-Red diverging colormap.
fn bluered_color(t: f64) -> Color {
    if t < 0.5 {
        let c = (t * 2.0 * 255.0) as u8;
        Color::Rgb(c, c, 255)
    } else {
        let c = ((1.0 - (t - 0.5) * 2.0) * 255.0) as u8;
        Color::Rgb(255, c, c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_visits_every_palette() {
        let mut palette = ColorPalette::default();
        for expected in ColorPalette::ALL {
            assert_eq!(palette, expected);
            palette = palette.next();
        }
        assert_eq!(palette, ColorPalette::Viridis);
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(ColorPalette::Viridis.color(0.0), Color::Rgb(68, 1, 84));
        assert_eq!(ColorPalette::Viridis.color(1.0), Color::Rgb(253, 231, 37));
        assert_eq!(ColorPalette::Rainbow.color(0.0), Color::Rgb(0, 0, 255));
        assert_eq!(ColorPalette::Rainbow.color(1.0), Color::Rgb(255, 0, 0));
        assert_eq!(ColorPalette::BlueRed.color(0.5), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_out_of_range_clamps() {
        for palette in ColorPalette::ALL {
            assert_eq!(palette.color(-3.0), palette.color(0.0));
            assert_eq!(palette.color(7.0), palette.color(1.0));
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("viridis".parse::<ColorPalette>(), Ok(ColorPalette::Viridis));
        assert_eq!("Blue-Red".parse::<ColorPalette>(), Ok(ColorPalette::BlueRed));
        assert!("jet".parse::<ColorPalette>().is_err());
    }
}

//! Horizontal colorbar legend.

use super::ColorScale;
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use unicode_width::UnicodeWidthStr;

/// One-line legend: `vmin ████████ vmax [units]`.
#[derive(Debug, Clone)]
pub struct Colorbar<'a> {
    scale: &'a ColorScale,
    units: Option<&'a str>,
    label_style: Style,
}

impl<'a> Colorbar<'a> {
    /// Legend for a color scale.
    pub fn new(scale: &'a ColorScale) -> Self {
        Self {
            scale,
            units: None,
            label_style: Style::default(),
        }
    }

    /// Units shown after the upper bound.
    pub fn units(mut self, units: Option<&'a str>) -> Self {
        self.units = units;
        self
    }

    /// Style for the bound labels.
    pub fn label_style(mut self, style: Style) -> Self {
        self.label_style = style;
        self
    }
}

/// Short number for axis and legend labels.
pub fn format_bound(val: f64) -> String {
    if val.fract() == 0.0 && val.abs() < 1e6 {
        format!("{}", val as i64)
    } else if val.abs() >= 1e4 || val.abs() < 1e-2 {
        format!("{:.1e}", val)
    } else {
        format!("{:.2}", val)
    }
}

impl Widget for Colorbar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let min_label = format_bound(self.scale.vmin());
        let max_label = match self.units {
            Some(units) => format!("{} {}", format_bound(self.scale.vmax()), units),
            None => format_bound(self.scale.vmax()),
        };

        let min_w = min_label.width() as u16;
        let max_w = max_label.width() as u16;
        let total = area.width as usize;
        let bar_width = 40.min(total.saturating_sub((min_w + max_w + 2) as usize));
        if bar_width == 0 {
            return;
        }

        let used = min_w + max_w + 2 + bar_width as u16;
        let start = area.x + (area.width - used) / 2;
        let bar_x = start + min_w + 1;

        buf.set_string(start, area.y, &min_label, self.label_style);
        for i in 0..bar_width {
            let t = i as f64 / (bar_width - 1).max(1) as f64;
            if let Some(cell) = buf.cell_mut((bar_x + i as u16, area.y)) {
                cell.set_symbol("█").set_fg(self.scale.color_at(t));
            }
        }
        buf.set_string(bar_x + bar_width as u16 + 1, area.y, &max_label, self.label_style);
    }
}

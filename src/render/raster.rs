//! Plain raster view: pixel position is the raw array index.

use super::ColorScale;
use crate::data::GeoSlice;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Width of the row label gutter.
const LABEL_WIDTH: u16 = 6;
/// Terminal cells per grid pixel; two cells are roughly square.
const PIXEL_WIDTH: usize = 2;

/// Heatmap of a slice in array order: row 0 at the top, column 0 at the left.
#[derive(Debug, Clone)]
pub struct RasterView<'a> {
    slice: &'a GeoSlice,
    scale: &'a ColorScale,
    missing_color: Color,
    label_style: Style,
}

impl<'a> RasterView<'a> {
    /// Create a raster view of a slice.
    pub fn new(slice: &'a GeoSlice, scale: &'a ColorScale) -> Self {
        Self {
            slice,
            scale,
            missing_color: Color::DarkGray,
            label_style: Style::default(),
        }
    }

    /// Color used for missing (NaN) cells.
    pub fn missing_color(mut self, color: Color) -> Self {
        self.missing_color = color;
        self
    }

    /// Style for axis labels.
    pub fn label_style(mut self, style: Style) -> Self {
        self.label_style = style;
        self
    }
}

/// Largest (rows, cols) in pixels that fits `max_h` x `max_w` and keeps the
/// grid's aspect ratio. Never less than one pixel per axis.
pub fn fit_grid(rows: usize, cols: usize, max_h: usize, max_w: usize) -> (usize, usize) {
    if rows == 0 || cols == 0 || max_h == 0 || max_w == 0 {
        return (0, 0);
    }
    let scale = (max_h as f64 / rows as f64).min(max_w as f64 / cols as f64);
    let disp_rows = ((rows as f64) * scale).floor().max(1.0) as usize;
    let disp_cols = ((cols as f64) * scale).floor().max(1.0) as usize;
    (disp_rows.min(max_h), disp_cols.min(max_w))
}

impl Widget for RasterView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (rows, cols) = self.slice.shape();
        if rows == 0 || cols == 0 || area.width <= LABEL_WIDTH || area.height < 2 {
            return;
        }

        let plot = Rect {
            x: area.x + LABEL_WIDTH,
            y: area.y,
            width: area.width - LABEL_WIDTH,
            height: area.height - 1,
        };

        let max_h = plot.height as usize;
        let max_w = plot.width as usize / PIXEL_WIDTH;
        let (disp_rows, disp_cols) = fit_grid(rows, cols, max_h, max_w);
        if disp_rows == 0 || disp_cols == 0 {
            return;
        }

        // Center the heatmap in the available space
        let offset_x = (((max_w - disp_cols) * PIXEL_WIDTH) / 2) as u16;
        let offset_y = ((max_h - disp_rows) / 2) as u16;

        let row_step = rows as f64 / disp_rows as f64;
        let col_step = cols as f64 / disp_cols as f64;
        let row_at = |y: usize| ((y as f64 * row_step).floor() as usize).min(rows - 1);
        let col_at = |x: usize| ((x as f64 * col_step).floor() as usize).min(cols - 1);

        for y in 0..disp_rows {
            let row = row_at(y);
            let screen_y = plot.y + offset_y + y as u16;
            for px in 0..disp_cols {
                let col = col_at(px);
                let value = self.slice.value(row, col).unwrap_or(f64::NAN);
                let (symbol, color) = match self.scale.color(value) {
                    Some(color) => ("█", color),
                    None => ("·", self.missing_color),
                };

                for i in 0..PIXEL_WIDTH {
                    let screen_x = plot.x + offset_x + (px * PIXEL_WIDTH + i) as u16;
                    if let Some(cell) = buf.cell_mut((screen_x, screen_y)) {
                        cell.set_symbol(symbol).set_fg(color);
                    }
                }
            }
        }

        // Row indices on the left
        for y in [0, disp_rows / 2, disp_rows - 1] {
            let label = format!("{:>width$}", row_at(y), width = LABEL_WIDTH as usize - 1);
            buf.set_string(area.x, plot.y + offset_y + y as u16, label, self.label_style);
        }

        // Column indices below
        let label_y = plot.y + offset_y + disp_rows as u16;
        for px in [0, disp_cols / 2, disp_cols - 1] {
            let label = col_at(px).to_string();
            let x = plot.x + offset_x + (px * PIXEL_WIDTH) as u16;
            let room = (plot.x + plot.width).saturating_sub(x) as usize;
            let label: String = label.chars().take(room).collect();
            buf.set_string(x, label_y, label, self.label_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TimeLabel;
    use crate::render::ColorPalette;
    use ndarray::array;

    fn slice() -> GeoSlice {
        GeoSlice::from_parts(
            "sst",
            TimeLabel::for_index(0),
            vec![10.0, 0.0],
            vec![0.0, 1.0],
            array![[0.0, 30.0], [f64::NAN, 15.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_fit_grid_keeps_aspect() {
        assert_eq!(fit_grid(90, 180, 30, 60), (30, 60));
        assert_eq!(fit_grid(90, 180, 45, 60), (30, 60));
        assert_eq!(fit_grid(2, 2, 10, 10), (10, 10));
        assert_eq!(fit_grid(1000, 1, 10, 10), (10, 1));
        assert_eq!(fit_grid(0, 5, 10, 10), (0, 0));
    }

    #[test]
    fn test_pixels_follow_array_index() {
        let slice = slice();
        let scale = ColorScale::celsius(ColorPalette::Viridis);
        let area = Rect::new(0, 0, LABEL_WIDTH + 4, 3);
        let mut buf = Buffer::empty(area);
        RasterView::new(&slice, &scale).render(area, &mut buf);

        let x0 = LABEL_WIDTH;
        let x1 = LABEL_WIDTH + PIXEL_WIDTH as u16;

        let top_left = &buf[(x0, 0)];
        assert_eq!(top_left.symbol(), "█");
        assert_eq!(Some(top_left.fg), scale.color(0.0));

        assert_eq!(Some(buf[(x1, 0)].fg), scale.color(30.0));
        assert_eq!(Some(buf[(x1, 1)].fg), scale.color(15.0));

        let missing = &buf[(x0, 1)];
        assert_eq!(missing.symbol(), "·");
        assert_eq!(missing.fg, Color::DarkGray);
    }

    #[test]
    fn test_render_is_deterministic() {
        let slice = slice();
        let scale = ColorScale::default();
        let area = Rect::new(0, 0, 30, 12);

        let mut first = Buffer::empty(area);
        let mut second = Buffer::empty(area);
        RasterView::new(&slice, &scale).render(area, &mut first);
        RasterView::new(&slice, &scale).render(area, &mut second);

        assert_eq!(first, second);
    }

    #[test]
    fn test_tiny_area_draws_nothing() {
        let slice = slice();
        let scale = ColorScale::default();
        let area = Rect::new(0, 0, LABEL_WIDTH, 1);
        let mut buf = Buffer::empty(area);
        RasterView::new(&slice, &scale).render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }
}

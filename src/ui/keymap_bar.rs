//! Keymap help bar UI component.

use crate::app::ViewMode;
use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Draw the keymap help bar.
pub fn draw_keymap(f: &mut Frame<'_>, area: Rect, view_mode: ViewMode, colors: &ThemeColors) {
    let keymap_text = match view_mode {
        ViewMode::Raster => "q:quit | Tab:map | [/]:month | c:palette | T:theme",
        ViewMode::Map => "q:quit | Tab:raster | [/]:month | c:palette | o:coastlines | T:theme",
    };

    let paragraph =
        Paragraph::new(keymap_text).style(Style::default().fg(colors.text).bg(colors.bg));

    f.render_widget(paragraph, area);
}

//! User interface rendering.

mod keymap_bar;
mod status_bar;
mod theme;
mod viewer;

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub use keymap_bar::draw_keymap;
pub use status_bar::draw_status;
pub use theme::ThemeColors;

/// Draw the UI.
pub fn draw(f: &mut Frame<'_>, app: &App) {
    let colors = ThemeColors::from_theme(&app.theme);

    // Main layout with status bar and key map bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)])
        .split(f.area());

    viewer::draw_viewer(f, app, chunks[0], &colors);
    draw_status(f, chunks[1], &app.status, &colors);
    draw_keymap(f, chunks[2], app.view_mode, &colors);
}

//! Slice viewer rendering.

use super::ThemeColors;
use crate::app::{App, ViewMode};
use crate::render::{format_bound, Colorbar, MapView, RasterView};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the header, the active view and the colorbar.
pub(super) fn draw_viewer(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let block = Block::default()
        .title(format!(" {} - {} ", app.slice.variable, app.view_mode.name()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .style(Style::default().bg(colors.bg));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(3),    // View
            Constraint::Length(1), // Colorbar
        ])
        .split(inner);

    draw_header(f, chunks[0], app, colors);

    let label_style = Style::default().fg(colors.label);
    match app.view_mode {
        ViewMode::Raster => f.render_widget(
            RasterView::new(&app.slice, &app.scale)
                .missing_color(colors.missing)
                .label_style(label_style),
            chunks[1],
        ),
        ViewMode::Map => f.render_widget(
            MapView::new(&app.slice, &app.scale)
                .coastlines(app.coastlines)
                .coastline_color(colors.coastline)
                .label_style(label_style),
            chunks[1],
        ),
    }

    f.render_widget(
        Colorbar::new(&app.scale)
            .units(app.slice.units.as_deref())
            .label_style(Style::default().fg(colors.value)),
        chunks[2],
    );
}

fn draw_header(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let slice = &app.slice;

    let mut title = vec![Span::styled(
        slice.long_name.clone().unwrap_or_else(|| slice.variable.clone()),
        Style::default()
            .fg(colors.heading)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(units) = &slice.units {
        title.push(Span::styled(
            format!(" [{}]", units),
            Style::default().fg(colors.value),
        ));
    }

    let (rows, cols) = slice.shape();
    let range = match slice.min_max() {
        Some((min, max)) => format!("{} .. {}", format_bound(min), format_bound(max)),
        None => "no valid data".to_string(),
    };

    let details = Line::from(vec![
        Span::styled(slice.time.to_string(), Style::default().fg(colors.text)),
        Span::styled("  Grid: ", Style::default().fg(colors.label)),
        Span::styled(format!("{}x{}", rows, cols), Style::default().fg(colors.text)),
        Span::styled("  Range: ", Style::default().fg(colors.label)),
        Span::styled(range, Style::default().fg(colors.text)),
        Span::styled("  Palette: ", Style::default().fg(colors.label)),
        Span::styled(app.scale.palette().name(), Style::default().fg(colors.text)),
    ]);

    let paragraph = Paragraph::new(vec![Line::from(title), details])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(colors.border)),
        );

    f.render_widget(paragraph, area);
}

// Title bar component
//
// Renders the app title, the current screen, and a fetch spinner when a
// request is in flight.

use crate::tui::app::{App, Route};
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the title bar at the top of the screen
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme.theme();

    let busy = app.home.loading
        || app.home.loading_more
        || app
            .item
            .as_ref()
            .is_some_and(|s| s.loading || s.replies_loading);
    let spinner = if busy {
        format!(" {} loading", app.spinner_char())
    } else {
        String::new()
    };

    let screen = match app.route() {
        Route::Home => format!("top stories · {}", app.view_mode.name()),
        Route::Item(id) => format!("item {}", id),
    };

    let title_text = format!(" ▲ focal ── {}{}", screen, spinner);

    let title = Paragraph::new(title_text).style(theme.title_style()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.title))
            .title_top(ratatui::text::Line::from(" ? ").right_aligned()),
    );

    f.render_widget(title, area);
}

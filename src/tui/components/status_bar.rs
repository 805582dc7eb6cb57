// Status bar component
//
// Renders context-sensitive key hints at the bottom, plus the most recent
// warning from the log buffer when there is one.

use crate::tui::app::{App, HomeFocus, Route};
use crate::util::ellipsize;
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the status bar with key hints for the focused surface
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme.theme();

    let hints = if app.modal.is_some() {
        " ↑↓ scroll │ Esc close"
    } else {
        match app.route() {
            Route::Home => match app.home.focus {
                HomeFocus::Collection => {
                    " ↑↓←→ move │ Enter open │ v view │ r refresh │ t theme │ c copy link │ q quit"
                }
                HomeFocus::LoadMore => " Enter load more │ ↑/← back to stories │ q quit",
            },
            Route::Item(_) => {
                " ←→ replies │ Space preview │ Enter open reply │ Esc back │ r refresh │ q quit"
            }
        }
    };

    // Surface the latest warn/error so problems aren't invisible behind
    // the alternate screen; `L` opens the full buffer
    let text = match app.log_buffer.last_problem() {
        Some(entry) => format!(
            "{} │ ⚠ {}",
            hints,
            ellipsize(&entry.message, area.width.saturating_sub(4) as usize / 2)
        ),
        None => hints.to_string(),
    };

    let bar = Paragraph::new(text).style(theme.status_style()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style()),
    );

    f.render_widget(bar, area);
}

// View composition
//
// Top-level draw: title bar, the routed screen, status bar, then overlays
// (modal, toast) on top. Views rebuild the mouse hit map on every frame so
// the input layer always tests against what is actually on screen.

mod home;
mod item;
mod overlay;

use crate::tui::app::{App, Route};
use crate::tui::components::{status_bar, title_bar};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

/// Draw the full UI for the current frame
pub fn draw(f: &mut Frame, app: &mut App) {
    app.last_width = f.area().width;
    app.hit_areas.clear();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title bar
            Constraint::Min(5),    // body
            Constraint::Length(3), // status bar
        ])
        .split(f.area());

    title_bar::render(f, chunks[0], app);

    match app.route() {
        Route::Home => home::render(f, chunks[1], app),
        Route::Item(_) => item::render(f, chunks[1], app),
    }

    status_bar::render(f, chunks[2], app);

    if app.modal.is_some() {
        overlay::render(f, app);
    }

    if let Some(toast) = &app.toast {
        let theme = app.theme.theme();
        toast.render(f, f.area(), &theme);
    }
}

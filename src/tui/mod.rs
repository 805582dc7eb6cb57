// Terminal lifecycle and the event loop.
//
// Owns raw-mode setup/teardown, the select! loop over terminal input,
// redraw ticks, and fetch results, and the keyboard dispatch walk.
// Dispatch is a priority-ordered stack: modal, then the load-more control
// when it holds focus, then the routed view, then global keys. The first
// layer that consumes a key stops the walk.

pub mod app;
pub mod clipboard;
pub mod components;
pub mod input;
pub mod layout;
pub mod modal;
pub mod theme;
pub mod views;

use crate::events::AppEvent;
use crate::nav::dispatch::{
    carousel_intent, home_intent, load_more_intent, CarouselIntent, Handled, HomeIntent,
    LoadMoreIntent,
};
use anyhow::{Context, Result};
use app::{App, HitTarget, HomeFocus, Route};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::{Modal, ModalAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// A press held at least this long counts as a long press (preview instead
/// of navigate).
const LONG_PRESS: Duration = Duration::from_millis(500);

/// Run the TUI
///
/// Sets up the terminal, drives the event loop until quit, and restores
/// the terminal on the way out even when the loop errors.
pub async fn run_tui(mut app: App, mut event_rx: mpsc::Receiver<AppEvent>) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Kick off the initial page before the first frame
    app.reload_home();

    // Run the event loop
    let result = run_event_loop(&mut terminal, &mut app, &mut event_rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// tokio::select! waits on terminal input, the redraw tick, and background
/// fetch results simultaneously, responding to whichever completes first.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &mut mpsc::Receiver<AppEvent>,
) -> Result<()> {
    // Periodic redraw tick; also drives spinners, the toast timer, and the
    // deferred focus restoration countdown
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard or mouse input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            // Periodic tick
            _ = tick_interval.tick() => {
                app.tick();
            }

            // Fetch results
            Some(app_event) = event_rx.recv() => {
                app.apply_event(app_event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Layered keyboard dispatch: modal, load-more control, routed view,
/// then global fallbacks.
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    // An open modal swallows everything
    if handle_modal_input(app, &key_event) {
        return;
    }

    match key_event.kind {
        KeyEventKind::Press => {
            let key = key_event.code;

            // Navigation keys repeat while held; action keys fire once.
            // A blocked (debounced) press is consumed, not passed down.
            if !app.handle_key_press(key) {
                return;
            }

            // Layer 2: the load-more control, when it holds focus, answers
            // before the collection so arrows can't double-handle
            if app.route() == Route::Home && app.home.focus == HomeFocus::LoadMore {
                if handle_load_more_keys(app, key).was_handled() {
                    return;
                }
            }

            // Layer 3: the routed view
            if handle_view_keys(app, key).was_handled() {
                return;
            }

            // Layer 4: global fallbacks
            handle_global_keys(app, key);
        }
        KeyEventKind::Release => {
            app.handle_key_release(key_event.code);
        }
        _ => {}
    }
}

/// Returns true when a modal is open and absorbed the event
fn handle_modal_input(app: &mut App, key_event: &KeyEvent) -> bool {
    if app.modal.is_none() {
        return false;
    }

    // Release events must still reach the debounce state even while a
    // modal is up, or keys stay stuck "pressed" after it closes
    if key_event.kind == KeyEventKind::Release {
        app.handle_key_release(key_event.code);
        return true;
    }

    if key_event.kind != KeyEventKind::Press {
        return true;
    }

    if !app.handle_key_press(key_event.code) {
        return true;
    }

    let action = match &mut app.modal {
        Some(modal) => modal.handle_input(key_event.code),
        None => return false,
    };

    match action {
        ModalAction::None => {}
        ModalAction::Close => {
            app.modal = None;
            app.modal_scroll = 0;
        }
        ModalAction::OpenItem(id) => {
            app.modal = None;
            app.modal_scroll = 0;
            app.open_item(id);
        }
        ModalAction::ScrollUp => app.modal_scroll = app.modal_scroll.saturating_sub(1),
        ModalAction::ScrollDown => app.modal_scroll = app.modal_scroll.saturating_add(1),
        ModalAction::PageUp => app.modal_scroll = app.modal_scroll.saturating_sub(10),
        ModalAction::PageDown => app.modal_scroll = app.modal_scroll.saturating_add(10),
    }

    true
}

/// Keys while the load-more control holds focus
fn handle_load_more_keys(app: &mut App, key: KeyCode) -> Handled {
    let Some(intent) = load_more_intent(key) else {
        return Handled::No;
    };
    match intent {
        LoadMoreIntent::BackToCollection => app.focus_collection(),
        LoadMoreIntent::Blocked => {
            // Recognized and consumed so the collection never sees it
        }
        LoadMoreIntent::Activate => app.load_more(),
    }
    Handled::Yes
}

/// Keys for the routed view
fn handle_view_keys(app: &mut App, key: KeyCode) -> Handled {
    match app.route() {
        Route::Home => {
            if key == KeyCode::Esc {
                // Explicit no-op: home is the bottom of the stack
                app.go_back();
                return Handled::Yes;
            }
            let Some(intent) = home_intent(key, app.view_mode) else {
                return Handled::No;
            };
            match intent {
                HomeIntent::Move(delta) => app.home_move(delta),
                HomeIntent::MoveRow(delta) => app.home_move_row(delta),
                HomeIntent::Open => app.open_selected_story(),
            }
            Handled::Yes
        }
        Route::Item(_) => {
            match key {
                KeyCode::Esc => {
                    app.go_back();
                    return Handled::Yes;
                }
                // Scroll the focused item's body text
                KeyCode::Up | KeyCode::PageUp => {
                    let step = if key == KeyCode::PageUp { 10 } else { 1 };
                    if let Some(state) = &mut app.item {
                        state.text_scroll = state.text_scroll.saturating_sub(step);
                    }
                    return Handled::Yes;
                }
                KeyCode::Down | KeyCode::PageDown => {
                    let step = if key == KeyCode::PageDown { 10 } else { 1 };
                    if let Some(state) = &mut app.item {
                        state.text_scroll = state.text_scroll.saturating_add(step);
                    }
                    return Handled::Yes;
                }
                _ => {}
            }
            let Some(intent) = carousel_intent(key) else {
                return Handled::No;
            };
            match intent {
                CarouselIntent::Move(delta) => app.carousel_move(delta),
                CarouselIntent::Preview => app.preview_selected_reply(),
                CarouselIntent::Open => app.open_selected_reply(),
            }
            Handled::Yes
        }
    }
}

/// Global keys - work the same regardless of view
fn handle_global_keys(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('v') => {
            app.toggle_view_mode();
            app.show_toast(format!("View: {}", app.view_mode.name()));
        }
        KeyCode::Char('t') => {
            app.next_theme();
            app.show_toast(format!("Theme: {}", app.theme.name()));
        }
        KeyCode::Char('c') => copy_focused_link(app),
        KeyCode::Char('?') => {
            app.modal_scroll = 0;
            app.modal = Some(Modal::Help);
        }
        KeyCode::Char('L') => {
            app.modal_scroll = 0;
            app.modal = Some(Modal::Logs);
        }
        _ => {}
    }
}

fn copy_focused_link(app: &mut App) {
    match app.focused_story_url() {
        Some(url) => {
            if clipboard::copy_to_clipboard(&url).is_ok() {
                app.show_toast("✓ Link copied");
            } else {
                app.show_toast("✗ Clipboard unavailable");
            }
        }
        None => app.show_toast("No link to copy"),
    }
}

/// Handle mouse input
///
/// Press/release pairs resolve against the hit map from the last draw.
/// A long press on a reply card previews it; a short press navigates.
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    match mouse_event.kind {
        MouseEventKind::ScrollUp => scroll_by(app, -1),
        MouseEventKind::ScrollDown => scroll_by(app, 1),
        MouseEventKind::Down(MouseButton::Left) => {
            app.mouse_down = Some((
                mouse_event.column,
                mouse_event.row,
                std::time::Instant::now(),
            ));
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let Some((x, y, pressed_at)) = app.mouse_down.take() else {
                return;
            };
            let Some(target) = app.hit_target_at(x, y) else {
                return;
            };
            let long_press = pressed_at.elapsed() >= LONG_PRESS;
            resolve_click(app, target, long_press);
        }
        _ => {}
    }
}

fn resolve_click(app: &mut App, target: HitTarget, long_press: bool) {
    if app.modal.is_some() {
        return;
    }
    match target {
        HitTarget::Story(index) => {
            app.home.interacted = true;
            app.home.selection.set_index(index as isize);
            app.open_selected_story();
        }
        HitTarget::Reply(index) => {
            if let Some(state) = &mut app.item {
                state.carousel.set_index(index as isize);
                if let Some(selected) = state.carousel.selected() {
                    app.store.set_reply_index(state.id, selected);
                }
            }
            if long_press {
                app.preview_selected_reply();
            } else {
                app.open_selected_reply();
            }
        }
        HitTarget::Crumb(id) => app.open_item(id),
        HitTarget::Link(url) => {
            if clipboard::copy_to_clipboard(&url).is_ok() {
                app.show_toast("✓ Link copied");
            } else {
                app.show_toast("✗ Clipboard unavailable");
            }
        }
        HitTarget::LoadMore => {
            app.home.focus = HomeFocus::LoadMore;
            app.load_more();
        }
    }
}

fn scroll_by(app: &mut App, delta: i32) {
    if app.modal.is_some() {
        if delta < 0 {
            app.modal_scroll = app.modal_scroll.saturating_sub(1);
        } else {
            app.modal_scroll = app.modal_scroll.saturating_add(1);
        }
        return;
    }
    match app.route() {
        Route::Home => {
            if delta < 0 {
                app.home_move_row(-1);
            } else {
                app.home_move_row(1);
            }
        }
        Route::Item(_) => {
            if let Some(state) = &mut app.item {
                if delta < 0 {
                    state.text_scroll = state.text_scroll.saturating_sub(2);
                } else {
                    state.text_scroll = state.text_scroll.saturating_add(2);
                }
            }
        }
    }
}

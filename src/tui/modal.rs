// Modal system for TUI overlays
//
// Self-contained modal dialogs that handle their own input and return actions.
// App just holds Option<Modal>, input routing acts on returned ModalAction.
// Modals sit at the top of the dispatch stack: while one is open it consumes
// every key before the views or global bindings see it.

use crossterm::event::KeyCode;

/// What the dispatch layer should do with a modal keypress
#[derive(Debug, Clone)]
pub enum ModalAction {
    /// Swallow the key without touching state
    None,
    /// Close the modal
    Close,
    /// Close the modal and navigate to the item it previews
    OpenItem(u64),
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
}

/// The overlays a view can stack on top of itself
#[derive(Debug, Clone)]
pub enum Modal {
    /// Keyboard shortcut reference
    Help,
    /// Reply preview - full text of the reply with the given id,
    /// shown without leaving the current item
    Preview(u64),
    /// Captured log buffer
    Logs,
}

impl Modal {
    /// Translate a keypress; the caller applies the returned action.
    pub fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::Preview(id) => match key {
                // Space toggles the preview closed again, matching how it opens
                KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('q') => ModalAction::Close,
                KeyCode::Enter => ModalAction::OpenItem(*id),
                KeyCode::Up | KeyCode::Char('k') => ModalAction::ScrollUp,
                KeyCode::Down | KeyCode::Char('j') => ModalAction::ScrollDown,
                KeyCode::PageUp => ModalAction::PageUp,
                KeyCode::PageDown => ModalAction::PageDown,
                _ => ModalAction::None,
            },
            Modal::Logs => match key {
                KeyCode::Esc | KeyCode::Char('L') | KeyCode::Char('q') => ModalAction::Close,
                KeyCode::Up | KeyCode::Char('k') => ModalAction::ScrollUp,
                KeyCode::Down | KeyCode::Char('j') => ModalAction::ScrollDown,
                KeyCode::PageUp => ModalAction::PageUp,
                KeyCode::PageDown => ModalAction::PageDown,
                _ => ModalAction::None,
            },
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_space_closes() {
        let mut modal = Modal::Preview(42);
        assert!(matches!(
            modal.handle_input(KeyCode::Char(' ')),
            ModalAction::Close
        ));
    }

    #[test]
    fn preview_enter_opens_item() {
        let mut modal = Modal::Preview(42);
        match modal.handle_input(KeyCode::Enter) {
            ModalAction::OpenItem(id) => assert_eq!(id, 42),
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn modal_swallows_navigation_keys() {
        // Arrow keys scroll the modal, they never leak to the view below
        let mut modal = Modal::Preview(1);
        assert!(matches!(
            modal.handle_input(KeyCode::Left),
            ModalAction::None
        ));
        assert!(matches!(
            modal.handle_input(KeyCode::Up),
            ModalAction::ScrollUp
        ));
    }
}

// Key -> intent translation for each interactive surface
//
// Key routing is a priority-ordered stack: the preview modal intercepts
// first, then the surface that currently holds focus (collection, load-more
// control, reply carousel), then global fallbacks. Each layer reports
// `Handled::Yes` to stop the walk. The walk itself lives in tui::mod; the
// per-surface translations here are pure so the precedence table can be
// tested without a terminal.

use crate::item::ViewMode;
use crossterm::event::KeyCode;

/// Verdict of a dispatch layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed; stop walking the stack
    Yes,
    /// Event was not recognized; hand it to the next layer
    No,
}

impl Handled {
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

/// Intent of a key press on the home story collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeIntent {
    /// Lateral move by this delta
    Move(isize),
    /// Row-wise move (grid only)
    MoveRow(isize),
    /// Open the selected story's detail view
    Open,
}

/// Translate a key for the home collection. The grid answers all four
/// arrows (with h/j/k/l aliases); the list only moves vertically.
pub fn home_intent(key: KeyCode, mode: ViewMode) -> Option<HomeIntent> {
    match (mode, key) {
        (ViewMode::Grid, KeyCode::Right | KeyCode::Char('l')) => Some(HomeIntent::Move(1)),
        (ViewMode::Grid, KeyCode::Left | KeyCode::Char('h')) => Some(HomeIntent::Move(-1)),
        (ViewMode::Grid, KeyCode::Down | KeyCode::Char('j')) => Some(HomeIntent::MoveRow(1)),
        (ViewMode::Grid, KeyCode::Up | KeyCode::Char('k')) => Some(HomeIntent::MoveRow(-1)),
        (ViewMode::List, KeyCode::Down | KeyCode::Char('j')) => Some(HomeIntent::Move(1)),
        (ViewMode::List, KeyCode::Up | KeyCode::Char('k')) => Some(HomeIntent::Move(-1)),
        (_, KeyCode::Enter) => Some(HomeIntent::Open),
        _ => None,
    }
}

/// Intent of a key press while the load-more control holds focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMoreIntent {
    /// Hand focus back to the last collection item
    BackToCollection,
    /// Recognized but deliberately inert; still consumed so the collection
    /// never double-handles it
    Blocked,
    /// Fetch the next page
    Activate,
}

pub fn load_more_intent(key: KeyCode) -> Option<LoadMoreIntent> {
    match key {
        KeyCode::Up | KeyCode::Left | KeyCode::Char('k') | KeyCode::Char('h') => {
            Some(LoadMoreIntent::BackToCollection)
        }
        KeyCode::Down | KeyCode::Right | KeyCode::Char('j') | KeyCode::Char('l') => {
            Some(LoadMoreIntent::Blocked)
        }
        KeyCode::Enter => Some(LoadMoreIntent::Activate),
        _ => None,
    }
}

/// Intent of a key press on the reply carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselIntent {
    /// Lateral move among the replies
    Move(isize),
    /// Open the preview modal for the selected reply
    Preview,
    /// Navigate into the selected reply's detail view
    Open,
}

pub fn carousel_intent(key: KeyCode) -> Option<CarouselIntent> {
    match key {
        KeyCode::Right | KeyCode::Char('l') => Some(CarouselIntent::Move(1)),
        KeyCode::Left | KeyCode::Char('h') => Some(CarouselIntent::Move(-1)),
        KeyCode::Char(' ') => Some(CarouselIntent::Preview),
        KeyCode::Enter => Some(CarouselIntent::Open),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_answers_all_four_arrows() {
        assert_eq!(
            home_intent(KeyCode::Right, ViewMode::Grid),
            Some(HomeIntent::Move(1))
        );
        assert_eq!(
            home_intent(KeyCode::Down, ViewMode::Grid),
            Some(HomeIntent::MoveRow(1))
        );
        assert_eq!(
            home_intent(KeyCode::Up, ViewMode::Grid),
            Some(HomeIntent::MoveRow(-1))
        );
    }

    #[test]
    fn list_ignores_lateral_arrows() {
        assert_eq!(home_intent(KeyCode::Right, ViewMode::List), None);
        assert_eq!(home_intent(KeyCode::Left, ViewMode::List), None);
        assert_eq!(
            home_intent(KeyCode::Down, ViewMode::List),
            Some(HomeIntent::Move(1))
        );
    }

    #[test]
    fn vim_keys_alias_the_arrows_everywhere() {
        assert_eq!(
            home_intent(KeyCode::Char('l'), ViewMode::Grid),
            home_intent(KeyCode::Right, ViewMode::Grid)
        );
        assert_eq!(
            home_intent(KeyCode::Char('j'), ViewMode::Grid),
            home_intent(KeyCode::Down, ViewMode::Grid)
        );
        assert_eq!(
            home_intent(KeyCode::Char('k'), ViewMode::List),
            home_intent(KeyCode::Up, ViewMode::List)
        );
        // The list has no lateral axis, for h/l just like for the arrows
        assert_eq!(home_intent(KeyCode::Char('h'), ViewMode::List), None);
        assert_eq!(
            load_more_intent(KeyCode::Char('k')),
            Some(LoadMoreIntent::BackToCollection)
        );
        assert_eq!(
            load_more_intent(KeyCode::Char('j')),
            Some(LoadMoreIntent::Blocked)
        );
        assert_eq!(
            carousel_intent(KeyCode::Char('h')),
            Some(CarouselIntent::Move(-1))
        );
    }

    #[test]
    fn load_more_blocks_forward_keys_instead_of_passing() {
        // Down/Right must be consumed-but-inert, otherwise the collection
        // layer would see them and reset selection
        assert_eq!(
            load_more_intent(KeyCode::Down),
            Some(LoadMoreIntent::Blocked)
        );
        assert_eq!(
            load_more_intent(KeyCode::Right),
            Some(LoadMoreIntent::Blocked)
        );
        assert_eq!(
            load_more_intent(KeyCode::Up),
            Some(LoadMoreIntent::BackToCollection)
        );
        assert_eq!(load_more_intent(KeyCode::Char('x')), None);
    }

    #[test]
    fn carousel_space_previews_enter_opens() {
        assert_eq!(
            carousel_intent(KeyCode::Char(' ')),
            Some(CarouselIntent::Preview)
        );
        assert_eq!(carousel_intent(KeyCode::Enter), Some(CarouselIntent::Open));
        assert_eq!(carousel_intent(KeyCode::Up), None);
    }
}

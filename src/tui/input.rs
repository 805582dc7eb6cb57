// Key repeat and debounce
//
// Crossterm delivers a Press event per keyboard repeat, and some terminals
// never deliver Release at all. This module decides which of those raw
// presses become actions: navigation keys repeat while held (slow start,
// then fast), action keys fire once per physical press with a debounce
// window covering release-less terminals.

use crossterm::event::KeyCode;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Re-trigger window for action keys on terminals that never send Release
const ACTION_DEBOUNCE: Duration = Duration::from_millis(150);

/// Repeat policy for one key
#[derive(Debug, Clone, Copy)]
enum Repeat {
    /// Fire once per press (Enter, toggles, quit)
    Once,
    /// Fire on press, then again every `interval` once `delay` has passed
    Held { delay: Duration, interval: Duration },
}

const NAV: Repeat = Repeat::Held {
    delay: Duration::from_millis(500),
    interval: Duration::from_millis(50),
};

const PAGE: Repeat = Repeat::Held {
    delay: Duration::from_millis(300),
    interval: Duration::from_millis(30),
};

#[derive(Debug, Default)]
struct Held {
    down: bool,
    since: Option<Instant>,
    last_fired: Option<Instant>,
}

/// Filters raw key presses into triggered actions
pub struct InputHandler {
    policies: HashMap<KeyCode, Repeat>,
    held: HashMap<KeyCode, Held>,
}

impl InputHandler {
    fn new() -> Self {
        let mut policies = HashMap::new();

        for key in [KeyCode::Up, KeyCode::Down, KeyCode::Left, KeyCode::Right] {
            policies.insert(key, NAV);
        }
        for key in ['j', 'k', 'h', 'l'] {
            policies.insert(KeyCode::Char(key), NAV);
        }
        for key in [KeyCode::PageUp, KeyCode::PageDown, KeyCode::Home, KeyCode::End] {
            policies.insert(key, PAGE);
        }
        for key in [KeyCode::Enter, KeyCode::Esc, KeyCode::Char(' ')] {
            policies.insert(key, Repeat::Once);
        }
        // q/Q quit, r refresh, v view, t theme, c copy, ?/L overlays
        for key in ['q', 'Q', 'r', 'v', 't', 'c', '?', 'L'] {
            policies.insert(KeyCode::Char(key), Repeat::Once);
        }

        Self {
            policies,
            held: HashMap::new(),
        }
    }

    /// Returns true when this press should become an action.
    pub fn handle_key_press(&mut self, key: KeyCode) -> bool {
        let now = Instant::now();
        let policy = self.policies.get(&key).copied().unwrap_or(Repeat::Once);
        let state = self.held.entry(key).or_default();

        if !state.down {
            // Fresh press always fires
            state.down = true;
            state.since = Some(now);
            state.last_fired = Some(now);
            return true;
        }

        match policy {
            Repeat::Once => {
                let fire = state
                    .last_fired
                    .is_some_and(|last| now.duration_since(last) >= ACTION_DEBOUNCE);
                if fire {
                    state.last_fired = Some(now);
                }
                fire
            }
            Repeat::Held { delay, interval } => {
                let (Some(since), Some(last)) = (state.since, state.last_fired) else {
                    return false;
                };
                let fire =
                    now.duration_since(since) >= delay && now.duration_since(last) >= interval;
                if fire {
                    state.last_fired = Some(now);
                }
                fire
            }
        }
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        if let Some(state) = self.held.get_mut(&key) {
            *state = Held::default();
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn action_key_fires_once_until_released() {
        let mut handler = InputHandler::default();

        assert!(handler.handle_key_press(KeyCode::Enter));
        assert!(!handler.handle_key_press(KeyCode::Enter));
        assert!(!handler.handle_key_press(KeyCode::Enter));

        handler.handle_key_release(KeyCode::Enter);
        assert!(handler.handle_key_press(KeyCode::Enter));
    }

    #[test]
    fn action_key_redebounces_without_release() {
        let mut handler = InputHandler::default();

        assert!(handler.handle_key_press(KeyCode::Char('v')));
        assert!(!handler.handle_key_press(KeyCode::Char('v')));

        thread::sleep(ACTION_DEBOUNCE + Duration::from_millis(10));
        assert!(handler.handle_key_press(KeyCode::Char('v')));
    }

    #[test]
    fn nav_key_repeats_after_delay() {
        let mut handler = InputHandler {
            policies: HashMap::from([(
                KeyCode::Down,
                Repeat::Held {
                    delay: Duration::from_millis(100),
                    interval: Duration::from_millis(50),
                },
            )]),
            held: HashMap::new(),
        };

        assert!(handler.handle_key_press(KeyCode::Down));
        assert!(!handler.handle_key_press(KeyCode::Down));

        thread::sleep(Duration::from_millis(110));
        assert!(handler.handle_key_press(KeyCode::Down));

        // Within the repeat interval nothing fires
        assert!(!handler.handle_key_press(KeyCode::Down));
        thread::sleep(Duration::from_millis(60));
        assert!(handler.handle_key_press(KeyCode::Down));
    }

    #[test]
    fn unknown_key_defaults_to_fire_once() {
        let mut handler = InputHandler::default();
        assert!(handler.handle_key_press(KeyCode::Char('z')));
        assert!(!handler.handle_key_press(KeyCode::Char('z')));
    }
}

// Focus position store - session-scoped selection memory
//
// Two namespaces, mirroring what the views need:
// - one scalar top-level focus index, written when the user navigates from
//   the home collection into a detail view and cleared once consumed
// - one reply focus index per parent item id, written on every carousel
//   selection change and cleared en masse when the top index is absent at
//   home mount (the fresh-session signal)
//
// State is written through to a JSON scratch file under the user cache dir so
// focus survives a relaunch. Any storage failure degrades to memory-only and
// is never surfaced to the user.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedFocus {
    top: Option<usize>,
    #[serde(default)]
    replies: HashMap<u64, usize>,
}

/// Session-scoped focus memory with write-through persistence
#[derive(Debug)]
pub struct FocusStore {
    state: PersistedFocus,
    /// None once persistence has been given up on
    path: Option<PathBuf>,
}

impl FocusStore {
    /// Load the store from the default scratch file, falling back to an
    /// empty in-memory store on any failure.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(path),
            None => {
                tracing::debug!("no cache dir available, focus store is memory-only");
                Self::in_memory()
            }
        }
    }

    fn default_path() -> Option<PathBuf> {
        dirs::cache_dir().map(|p| p.join("focal").join("session.json"))
    }

    fn load_from(path: PathBuf) -> Self {
        let state = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::debug!("discarding unreadable focus state: {}", e);
                PersistedFocus::default()
            }),
            Err(_) => PersistedFocus::default(),
        };
        Self {
            state,
            path: Some(path),
        }
    }

    /// A store that never touches the filesystem
    pub fn in_memory() -> Self {
        Self {
            state: PersistedFocus::default(),
            path: None,
        }
    }

    /// Top-level focus index; `None` means no stored focus.
    pub fn top_index(&self) -> Option<usize> {
        self.state.top
    }

    pub fn set_top_index(&mut self, index: usize) {
        self.state.top = Some(index);
        self.persist();
    }

    pub fn clear_top_index(&mut self) {
        if self.state.top.take().is_some() {
            self.persist();
        }
    }

    /// Reply focus for a parent item. Unlike the top level, reply views
    /// default to first-reply focus, so an unwritten entry reads as 0.
    pub fn reply_index(&self, parent_id: u64) -> usize {
        self.state.replies.get(&parent_id).copied().unwrap_or(0)
    }

    pub fn set_reply_index(&mut self, parent_id: u64, index: usize) {
        self.state.replies.insert(parent_id, index);
        self.persist();
    }

    /// Drop every stored reply index. Invoked when the home view mounts
    /// without a stored top index, so stale deep-navigation state cannot
    /// leak into a new session.
    pub fn clear_all_reply_indices(&mut self) {
        if !self.state.replies.is_empty() {
            self.state.replies.clear();
            self.persist();
        }
    }

    fn persist(&mut self) {
        let Some(path) = &self.path else {
            return;
        };
        let result = (|| -> std::io::Result<()> {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string(&self.state)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            std::fs::write(path, json)
        })();

        if let Err(e) = result {
            // Degrade to memory-only; focus still works within this run
            tracing::debug!("focus store persistence disabled: {}", e);
            self.path = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_index_defaults_to_none() {
        let store = FocusStore::in_memory();
        assert_eq!(store.top_index(), None);
    }

    #[test]
    fn reply_index_defaults_to_zero_not_absent() {
        let store = FocusStore::in_memory();
        assert_eq!(store.reply_index(12345), 0);
    }

    #[test]
    fn top_index_round_trip_and_clear() {
        let mut store = FocusStore::in_memory();
        store.set_top_index(3);
        assert_eq!(store.top_index(), Some(3));
        store.clear_top_index();
        assert_eq!(store.top_index(), None);
    }

    #[test]
    fn clear_all_reply_indices_is_wholesale() {
        let mut store = FocusStore::in_memory();
        store.set_reply_index(1, 4);
        store.set_reply_index(2, 7);
        store.clear_all_reply_indices();
        assert_eq!(store.reply_index(1), 0);
        assert_eq!(store.reply_index(2), 0);
    }

    #[test]
    fn persists_across_reload() {
        let path = std::env::temp_dir().join(format!(
            "focal-store-test-{}-{:?}.json",
            std::process::id(),
            std::thread::current().id()
        ));
        let _ = std::fs::remove_file(&path);

        let mut store = FocusStore::load_from(path.clone());
        store.set_top_index(5);
        store.set_reply_index(42, 2);
        drop(store);

        let store = FocusStore::load_from(path.clone());
        assert_eq!(store.top_index(), Some(5));
        assert_eq!(store.reply_index(42), 2);

        let _ = std::fs::remove_file(&path);
    }
}

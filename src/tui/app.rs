// TUI application state
//
// This module owns everything the views render from: the route stack, the
// home collection, the focused item, pending fetches, the modal, and the
// toast. State mutations live here; the key dispatch walk in tui::mod only
// translates input and calls into these methods.

use super::input::InputHandler;
use super::layout::Breakpoint;
use super::modal::Modal;
use super::theme::ThemeKind;
use crate::api::HnClient;
use crate::config::Config;
use crate::events::{self, AppEvent};
use crate::item::{Comment, Item, PathEntry, Story, ViewMode};
use crate::logging::LogBuffer;
use crate::nav::selection::{MoveOutcome, SelectionController};
use crate::store::FocusStore;
use crate::tui::components::Toast;
use ratatui::layout::Rect;
use tokio::sync::mpsc;

/// Render ticks to wait before applying a restored home focus. The first
/// tick after the stories arrive still paints the unfocused collection;
/// restoring on the tick after that lands on a fully laid-out grid.
const RESTORE_DELAY_TICKS: u8 = 2;

/// Where we are in the app. The stack gives Esc a real back semantics:
/// top of the stack is the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Item(u64),
}

/// Which surface on the home screen holds keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HomeFocus {
    #[default]
    Collection,
    LoadMore,
}

/// Regions the mouse can land on, rebuilt by the views on every draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    /// A story card/row in the home collection
    Story(usize),
    /// A reply card in the carousel
    Reply(usize),
    /// The story's external link row; clicking copies the URL
    Link(String),
    /// A breadcrumb entry; clicking routes to that ancestor
    Crumb(u64),
    /// The load-more control
    LoadMore,
}

/// Home screen state: the paged story collection plus its focus machinery
pub struct HomeState {
    pub stories: Vec<Story>,
    pub selection: SelectionController,
    pub focus: HomeFocus,
    /// First visible grid row (or list row), maintained by the view
    pub scroll_row: usize,
    pub loading: bool,
    pub loading_more: bool,
    /// Epoch of the most recent home fetch; decides whether a dropped stale
    /// result still owns the in-flight flags
    fetch_epoch: u64,
    pub error: Option<String>,
    /// Stored focus waiting to be applied, with its tick countdown
    pub pending_restore: Option<(usize, u8)>,
    /// Set on the first manual navigation; a pending restore then aborts
    pub interacted: bool,
}

impl HomeState {
    fn new() -> Self {
        Self {
            stories: Vec::new(),
            selection: SelectionController::new(0),
            focus: HomeFocus::default(),
            scroll_row: 0,
            loading: false,
            loading_more: false,
            fetch_epoch: 0,
            error: None,
            pending_restore: None,
            interacted: false,
        }
    }
}

/// Item screen state: the focused item, its ancestry path, and the reply
/// carousel below it
pub struct ItemState {
    pub id: u64,
    pub item: Option<Item>,
    pub path: Vec<PathEntry>,
    pub replies: Vec<Comment>,
    pub carousel: SelectionController,
    pub loading: bool,
    pub replies_loading: bool,
    pub error: Option<String>,
    /// Vertical scroll within the focused item's body text
    pub text_scroll: u16,
}

impl ItemState {
    fn new(id: u64) -> Self {
        Self {
            id,
            item: None,
            path: Vec::new(),
            replies: Vec::new(),
            carousel: SelectionController::new(0),
            loading: true,
            replies_loading: true,
            error: None,
            text_scroll: 0,
        }
    }
}

/// Main application state for the TUI
pub struct App {
    pub config: Config,
    pub client: HnClient,
    pub store: FocusStore,
    tx: mpsc::Sender<AppEvent>,

    /// Current navigation stack; never empty, bottom is always Home
    pub routes: Vec<Route>,
    pub home: HomeState,
    pub item: Option<ItemState>,

    pub view_mode: ViewMode,
    pub theme: ThemeKind,
    pub modal: Option<Modal>,
    pub modal_scroll: u16,
    pub toast: Option<Toast>,
    pub log_buffer: LogBuffer,
    pub should_quit: bool,

    /// Monotonic fetch generation; results tagged with an older value are
    /// dropped on arrival
    pub epoch: u64,

    /// Terminal width from the last draw, used to derive grid columns for
    /// row-wise key navigation
    pub last_width: u16,
    pub spinner_frame: usize,

    /// Mouse hit regions from the last draw
    pub hit_areas: Vec<(Rect, HitTarget)>,
    /// Pending left-button press: position and press start, resolved on
    /// release so a long press can mean something different from a click
    pub mouse_down: Option<(u16, u16, std::time::Instant)>,

    input_handler: InputHandler,
}

impl App {
    pub fn new(
        config: Config,
        client: HnClient,
        mut store: FocusStore,
        tx: mpsc::Sender<AppEvent>,
        log_buffer: LogBuffer,
    ) -> Self {
        // No stored top index means this is a fresh session: any surviving
        // reply indices belong to a previous run and are wiped wholesale.
        if store.top_index().is_none() {
            store.clear_all_reply_indices();
        }

        let view_mode = config.ui.view_mode;
        let theme = ThemeKind::parse(&config.ui.theme);

        Self {
            config,
            client,
            store,
            tx,
            routes: vec![Route::Home],
            home: HomeState::new(),
            item: None,
            view_mode,
            theme,
            modal: None,
            modal_scroll: 0,
            toast: None,
            log_buffer,
            should_quit: false,
            epoch: 0,
            last_width: 80,
            spinner_frame: 0,
            hit_areas: Vec::new(),
            mouse_down: None,
            input_handler: InputHandler::default(),
        }
    }

    pub fn route(&self) -> Route {
        *self.routes.last().unwrap_or(&Route::Home)
    }

    /// Grid column count for keyboard row navigation, derived from the last
    /// rendered width. The list is always single-column.
    pub fn columns(&self) -> usize {
        match self.view_mode {
            ViewMode::Grid => Breakpoint::from_width(self.last_width).columns(),
            ViewMode::List => 1,
        }
    }

    // ─── Fetching ────────────────────────────────────────────────────────────

    fn next_epoch(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }

    /// (Re)load the first page of the home collection.
    pub fn reload_home(&mut self) {
        let epoch = self.next_epoch();
        self.home.loading = true;
        self.home.loading_more = false;
        self.home.fetch_epoch = epoch;
        self.home.error = None;
        events::spawn_top_stories(
            self.client.clone(),
            self.tx.clone(),
            epoch,
            self.config.api.page_size,
            0,
            false,
        );
    }

    /// Fetch the next page of stories. No-op while a page is already in
    /// flight so the control can't be double-activated.
    pub fn load_more(&mut self) {
        if self.home.loading_more || self.home.loading {
            return;
        }
        self.home.loading_more = true;
        self.home.fetch_epoch = self.epoch;
        events::spawn_top_stories(
            self.client.clone(),
            self.tx.clone(),
            self.epoch,
            self.config.api.page_size,
            self.home.stories.len(),
            true,
        );
    }

    /// Navigate into an item's detail view.
    pub fn open_item(&mut self, id: u64) {
        // Leaving home: remember where focus was so a later session can
        // restore it. Leaving an item: remember the carousel position for
        // the breadcrumb trip back.
        if self.route() == Route::Home {
            if let Some(index) = self.home.selection.selected() {
                self.store.set_top_index(index);
            }
        } else if let Some(state) = &self.item {
            if let Some(index) = state.carousel.selected() {
                self.store.set_reply_index(state.id, index);
            }
        }

        self.routes.push(Route::Item(id));
        self.item = Some(ItemState::new(id));
        let epoch = self.next_epoch();
        events::spawn_item_load(self.client.clone(), self.tx.clone(), epoch, id);
    }

    /// Pop the route stack. On the home screen this is an explicit no-op,
    /// not a quit.
    pub fn go_back(&mut self) {
        if self.routes.len() <= 1 {
            tracing::debug!("back ignored: already at home");
            return;
        }
        self.routes.pop();
        // Invalidate any in-flight fetch for the screen we just left
        self.next_epoch();
        match self.route() {
            Route::Home => {
                self.item = None;
                // Focus was consumed in-memory; the stored copy only serves
                // cross-run restoration and would otherwise go stale.
                self.store.clear_top_index();
            }
            Route::Item(id) => {
                self.item = Some(ItemState::new(id));
                events::spawn_item_load(self.client.clone(), self.tx.clone(), self.epoch, id);
            }
        }
    }

    /// Refetch whatever the current screen shows.
    pub fn refresh(&mut self) {
        match self.route() {
            Route::Home => self.reload_home(),
            Route::Item(id) => {
                self.item = Some(ItemState::new(id));
                let epoch = self.next_epoch();
                events::spawn_item_load(self.client.clone(), self.tx.clone(), epoch, id);
            }
        }
    }

    // ─── Event application ───────────────────────────────────────────────────

    /// Apply a background fetch result. Results from a superseded epoch are
    /// dropped: the screen that requested them no longer exists.
    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::TopStoriesLoaded {
                epoch,
                stories,
                append,
            } => {
                if epoch != self.epoch {
                    tracing::debug!("dropping stale top-stories result (epoch {})", epoch);
                    self.discard_stale_home_fetch(epoch);
                    return;
                }
                if append {
                    self.apply_more_stories(stories);
                } else {
                    self.apply_fresh_stories(stories);
                }
            }
            AppEvent::TopStoriesFailed { epoch, error } => {
                if epoch != self.epoch {
                    self.discard_stale_home_fetch(epoch);
                    return;
                }
                tracing::warn!("top stories fetch failed: {}", error);
                if self.home.loading_more {
                    self.home.loading_more = false;
                    self.show_toast("✗ Could not load more stories");
                } else {
                    self.home.loading = false;
                    self.home.error = Some(error);
                }
            }
            AppEvent::ItemLoaded { epoch, item, path } => {
                if epoch != self.epoch {
                    return;
                }
                if let Some(state) = &mut self.item {
                    if state.id == item.id() {
                        state.item = Some(*item);
                        state.path = path;
                        state.loading = false;
                    }
                }
            }
            AppEvent::ItemFailed { epoch, id, error } => {
                if epoch != self.epoch {
                    return;
                }
                tracing::warn!("item {} fetch failed: {}", id, error);
                if let Some(state) = &mut self.item {
                    if state.id == id {
                        state.loading = false;
                        state.error = Some(error);
                    }
                }
            }
            AppEvent::RepliesLoaded {
                epoch,
                parent_id,
                replies,
            } => {
                if epoch != self.epoch {
                    return;
                }
                if let Some(state) = &mut self.item {
                    if state.id == parent_id {
                        state.carousel.set_len(replies.len());
                        if !replies.is_empty() {
                            // Seed from the stored per-parent position,
                            // clamped in case the tree shrank
                            let stored = self.store.reply_index(parent_id);
                            let seeded = stored.min(replies.len() - 1);
                            state.carousel.set_index(seeded as isize);
                        }
                        state.replies = replies;
                        state.replies_loading = false;
                    }
                }
            }
        }
    }

    /// A dropped result still ends its fetch. Unless a newer home fetch has
    /// taken over the flags, release them so the load-more control doesn't
    /// spin (and refuse activation) forever.
    fn discard_stale_home_fetch(&mut self, epoch: u64) {
        if epoch == self.home.fetch_epoch {
            self.home.loading = false;
            self.home.loading_more = false;
        }
    }

    fn apply_fresh_stories(&mut self, stories: Vec<Story>) {
        self.home.selection.set_len(stories.len());
        self.home.stories = stories;
        self.home.loading = false;
        self.home.error = None;
        self.home.scroll_row = 0;

        // Arm the deferred focus restoration if a position survives from a
        // previous run and the user hasn't navigated yet
        if !self.home.interacted {
            if let Some(index) = self.store.top_index() {
                if index < self.home.stories.len() {
                    self.home.pending_restore = Some((index, RESTORE_DELAY_TICKS));
                }
            }
        }
    }

    fn apply_more_stories(&mut self, stories: Vec<Story>) {
        self.home.loading_more = false;
        if stories.is_empty() {
            self.show_toast("No more stories");
            self.home.focus = HomeFocus::Collection;
            return;
        }
        let first_new = self.home.stories.len();
        self.home.stories.extend(stories);
        self.home.selection.set_len(self.home.stories.len());
        // Hand focus to the first story of the new page
        self.home.selection.set_index(first_new as isize);
        self.home.focus = HomeFocus::Collection;
    }

    // ─── Periodic tick ───────────────────────────────────────────────────────

    /// Advance animations, expire the toast, and run the deferred focus
    /// restoration countdown.
    pub fn tick(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);

        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }

        if let Some((index, ticks)) = self.home.pending_restore {
            if self.home.interacted {
                // The user got there first; the restore fires at most once
                // and never overrides a manual position
                self.home.pending_restore = None;
                self.store.clear_top_index();
            } else if ticks > 1 {
                self.home.pending_restore = Some((index, ticks - 1));
            } else {
                self.home.selection.set_index(index as isize);
                self.home.pending_restore = None;
                self.store.clear_top_index();
            }
        }
    }

    pub fn spinner_char(&self) -> char {
        const FRAMES: [char; 4] = ['|', '/', '-', '\\'];
        FRAMES[self.spinner_frame % FRAMES.len()]
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    // ─── Navigation actions ──────────────────────────────────────────────────

    /// Move the home selection laterally. A forward move past the last story
    /// clears the selection and hands focus to the load-more control, so
    /// re-entering the collection lands on the last card.
    pub fn home_move(&mut self, delta: isize) {
        self.home.interacted = true;
        match self.home.selection.move_by(delta) {
            MoveOutcome::PastEnd => {
                self.home.selection.clear();
                self.home.focus = HomeFocus::LoadMore;
            }
            MoveOutcome::Moved(_) | MoveOutcome::Clamped => {}
        }
    }

    /// Move the home selection by whole rows (grid layout).
    pub fn home_move_row(&mut self, delta_rows: isize) {
        self.home.interacted = true;
        let columns = self.columns();
        match self.home.selection.move_by_row(delta_rows, columns) {
            MoveOutcome::PastEnd => self.home.focus = HomeFocus::LoadMore,
            MoveOutcome::Moved(_) | MoveOutcome::Clamped => {}
        }
    }

    /// Open the currently selected story, if any.
    pub fn open_selected_story(&mut self) {
        if let Some(index) = self.home.selection.selected() {
            if let Some(story) = self.home.stories.get(index) {
                self.open_item(story.id);
            }
        }
    }

    /// Hand focus from the load-more control back to the collection. The
    /// selection is untouched: it still points at the story it left from.
    pub fn focus_collection(&mut self) {
        self.home.focus = HomeFocus::Collection;
        if self.home.selection.selected().is_none() {
            self.home.selection.focus_last();
        }
    }

    /// Move the reply carousel. Both boundaries clamp; every landed move is
    /// written through to the per-parent store.
    pub fn carousel_move(&mut self, delta: isize) {
        let Some(state) = &mut self.item else { return };
        if let MoveOutcome::Moved(index) = state.carousel.move_by(delta) {
            self.store.set_reply_index(state.id, index);
        }
    }

    /// Open the preview modal for the selected reply.
    pub fn preview_selected_reply(&mut self) {
        if let Some(id) = self.selected_reply_id() {
            self.modal_scroll = 0;
            self.modal = Some(Modal::Preview(id));
        }
    }

    /// Navigate into the selected reply.
    pub fn open_selected_reply(&mut self) {
        if let Some(id) = self.selected_reply_id() {
            self.open_item(id);
        }
    }

    pub fn selected_reply_id(&self) -> Option<u64> {
        let state = self.item.as_ref()?;
        let index = state.carousel.selected()?;
        state.replies.get(index).map(|r| r.id)
    }

    pub fn selected_reply(&self) -> Option<&Comment> {
        let state = self.item.as_ref()?;
        let index = state.carousel.selected()?;
        state.replies.get(index)
    }

    /// Find the reply a preview modal refers to.
    pub fn reply_by_id(&self, id: u64) -> Option<&Comment> {
        self.item.as_ref()?.replies.iter().find(|r| r.id == id)
    }

    /// URL of the story under focus (home selection or item view root).
    pub fn focused_story_url(&self) -> Option<String> {
        match self.route() {
            Route::Home => {
                let index = self.home.selection.selected()?;
                self.home.stories.get(index)?.url.clone()
            }
            Route::Item(_) => match self.item.as_ref()?.item.as_ref()? {
                Item::Story(s) => s.url.clone(),
                Item::Comment(_) => None,
            },
        }
    }

    // ─── Preferences ─────────────────────────────────────────────────────────

    /// Toggle grid/list and persist the choice.
    pub fn toggle_view_mode(&mut self) {
        self.view_mode = self.view_mode.toggle();
        self.config.ui.view_mode = self.view_mode;
        self.config.save_ui_prefs();
    }

    /// Cycle to the next theme and persist the choice.
    pub fn next_theme(&mut self) {
        self.theme = self.theme.next();
        self.config.ui.theme = self.theme.name().to_string();
        self.config.save_ui_prefs();
    }

    // ─── Input plumbing ──────────────────────────────────────────────────────

    /// Handle a key press - returns true if the action should be triggered
    /// Uses the configured behavior for each key (state-change or repeatable)
    pub fn handle_key_press(&mut self, key: crossterm::event::KeyCode) -> bool {
        self.input_handler.handle_key_press(key)
    }

    /// Handle a key release
    pub fn handle_key_release(&mut self, key: crossterm::event::KeyCode) {
        self.input_handler.handle_key_release(key);
    }

    /// Find the hit target under a terminal cell, topmost region first.
    pub fn hit_target_at(&self, x: u16, y: u16) -> Option<HitTarget> {
        self.hit_areas
            .iter()
            .rev()
            .find(|(rect, _)| {
                x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
            })
            .map(|(_, target)| target.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Comment;

    fn story(id: u64) -> Story {
        Story {
            id,
            title: format!("Story {}", id),
            url: Some(format!("https://example.com/{}", id)),
            author: "tester".into(),
            points: 1,
            comment_count: 0,
            time: 0,
            text: None,
            child_ids: vec![],
        }
    }

    fn comment(id: u64, parent_id: u64) -> Comment {
        Comment {
            id,
            author: "tester".into(),
            text: "hello".into(),
            time: 0,
            child_ids: vec![],
            parent_id,
            deleted: false,
            total_reply_count: None,
        }
    }

    fn test_app() -> App {
        let (tx, _rx) = mpsc::channel(16);
        App::new(
            Config::default(),
            HnClient::new("http://localhost:0", "http://localhost:0", 1),
            FocusStore::in_memory(),
            tx,
            LogBuffer::new(),
        )
    }

    fn app_with_stories(count: u64) -> App {
        let mut app = test_app();
        app.epoch = 1;
        app.apply_event(AppEvent::TopStoriesLoaded {
            epoch: 1,
            stories: (1..=count).map(story).collect(),
            append: false,
        });
        app
    }

    #[test]
    fn forward_past_last_story_focuses_load_more() {
        let mut app = app_with_stories(3);
        app.home.selection.set_index(2);
        app.home_move(1);
        assert_eq!(app.home.focus, HomeFocus::LoadMore);
        // Selection is cleared so re-entry lands on the last card
        assert_eq!(app.home.selection.selected(), None);
        app.focus_collection();
        assert_eq!(app.home.selection.selected(), Some(2));
    }

    #[test]
    fn backward_at_first_story_stays_in_collection() {
        let mut app = app_with_stories(3);
        app.home.selection.set_index(0);
        app.home_move(-1);
        assert_eq!(app.home.focus, HomeFocus::Collection);
        assert_eq!(app.home.selection.selected(), Some(0));
    }

    #[test]
    fn load_more_page_focuses_first_appended_story() {
        let mut app = app_with_stories(3);
        app.home.focus = HomeFocus::LoadMore;
        app.home.loading_more = true;
        app.apply_event(AppEvent::TopStoriesLoaded {
            epoch: app.epoch,
            stories: (4..=6).map(story).collect(),
            append: true,
        });
        assert_eq!(app.home.focus, HomeFocus::Collection);
        assert_eq!(app.home.selection.selected(), Some(3));
        assert_eq!(app.home.stories.len(), 6);
    }

    #[test]
    fn empty_load_more_page_returns_focus_without_moving() {
        let mut app = app_with_stories(3);
        app.home.selection.set_index(2);
        app.home.focus = HomeFocus::LoadMore;
        app.home.loading_more = true;
        app.apply_event(AppEvent::TopStoriesLoaded {
            epoch: app.epoch,
            stories: vec![],
            append: true,
        });
        assert_eq!(app.home.focus, HomeFocus::Collection);
        assert_eq!(app.home.selection.selected(), Some(2));
    }

    // refresh() spawns a fetch task, so these need a runtime
    #[tokio::test]
    async fn stale_epoch_results_are_dropped() {
        let mut app = app_with_stories(3);
        let stale = app.epoch;
        app.refresh();
        app.apply_event(AppEvent::TopStoriesLoaded {
            epoch: stale,
            stories: (10..=12).map(story).collect(),
            append: false,
        });
        // Still the original page; the stale refresh result never landed
        assert_eq!(app.home.stories[0].id, 1);
    }

    #[tokio::test]
    async fn dropped_stale_page_releases_load_more() {
        let mut app = app_with_stories(3);
        app.load_more();
        assert!(app.home.loading_more);
        let in_flight = app.epoch;

        // Navigating away supersedes the page fetch; its late result is
        // dropped but must still release the in-flight flag
        app.open_item(1);
        app.apply_event(AppEvent::TopStoriesLoaded {
            epoch: in_flight,
            stories: (10..=12).map(story).collect(),
            append: true,
        });
        app.go_back();

        assert!(!app.home.loading_more);
        assert_eq!(app.home.stories.len(), 3);
        app.load_more();
        assert!(app.home.loading_more);
    }

    #[tokio::test]
    async fn stale_drop_leaves_newer_reload_in_flight() {
        let mut app = app_with_stories(3);
        let stale = app.epoch;
        app.reload_home();
        app.apply_event(AppEvent::TopStoriesFailed {
            epoch: stale,
            error: "timed out".into(),
        });
        // The failure belonged to the superseded fetch; the reload spinner
        // stays up until its own result lands
        assert!(app.home.loading);
    }

    #[test]
    fn restore_fires_after_delay_and_consumes_stored_index() {
        let mut app = test_app();
        app.store.set_top_index(2);
        app.epoch = 1;
        app.apply_event(AppEvent::TopStoriesLoaded {
            epoch: 1,
            stories: (1..=5).map(story).collect(),
            append: false,
        });
        assert_eq!(app.home.selection.selected(), None);

        app.tick();
        assert_eq!(app.home.selection.selected(), None);
        app.tick();
        assert_eq!(app.home.selection.selected(), Some(2));
        assert_eq!(app.store.top_index(), None);
    }

    #[test]
    fn restore_skipped_when_user_navigated_first() {
        let mut app = test_app();
        app.store.set_top_index(2);
        app.epoch = 1;
        app.apply_event(AppEvent::TopStoriesLoaded {
            epoch: 1,
            stories: (1..=5).map(story).collect(),
            append: false,
        });
        app.home_move(1); // lands on 0, marks interaction
        app.tick();
        app.tick();
        assert_eq!(app.home.selection.selected(), Some(0));
        assert_eq!(app.store.top_index(), None);
    }

    #[test]
    fn fresh_session_wipes_reply_indices() {
        let (tx, _rx) = mpsc::channel(16);
        let mut store = FocusStore::in_memory();
        store.set_reply_index(99, 4);
        // No top index stored -> fresh session
        let app = App::new(
            Config::default(),
            HnClient::new("http://localhost:0", "http://localhost:0", 1),
            store,
            tx,
            LogBuffer::new(),
        );
        assert_eq!(app.store.reply_index(99), 0);
    }

    #[test]
    fn continued_session_keeps_reply_indices() {
        let (tx, _rx) = mpsc::channel(16);
        let mut store = FocusStore::in_memory();
        store.set_top_index(1);
        store.set_reply_index(99, 4);
        let app = App::new(
            Config::default(),
            HnClient::new("http://localhost:0", "http://localhost:0", 1),
            store,
            tx,
            LogBuffer::new(),
        );
        assert_eq!(app.store.reply_index(99), 4);
    }

    #[test]
    fn esc_on_home_is_a_no_op() {
        let mut app = app_with_stories(3);
        app.go_back();
        assert_eq!(app.route(), Route::Home);
        assert!(!app.should_quit);
    }

    #[test]
    fn carousel_seeded_from_stored_index_and_clamped() {
        let mut app = app_with_stories(1);
        app.store.set_reply_index(42, 7);
        app.routes.push(Route::Item(42));
        app.item = Some(ItemState::new(42));
        app.apply_event(AppEvent::RepliesLoaded {
            epoch: app.epoch,
            parent_id: 42,
            replies: (100..103).map(|id| comment(id, 42)).collect(),
        });
        // Stored 7 is past the end of 3 replies; clamp to the last one
        assert_eq!(app.item.as_ref().unwrap().carousel.selected(), Some(2));
    }

    #[test]
    fn carousel_moves_write_through_to_store() {
        let mut app = app_with_stories(1);
        app.routes.push(Route::Item(42));
        app.item = Some(ItemState::new(42));
        app.apply_event(AppEvent::RepliesLoaded {
            epoch: app.epoch,
            parent_id: 42,
            replies: (100..103).map(|id| comment(id, 42)).collect(),
        });
        app.carousel_move(1);
        assert_eq!(app.store.reply_index(42), 1);
        // Clamped moves don't rewrite the stored position
        app.carousel_move(-5);
        assert_eq!(app.item.as_ref().unwrap().carousel.selected(), Some(0));
        assert_eq!(app.store.reply_index(42), 0);
    }

    #[tokio::test]
    async fn back_from_item_returns_home_and_clears_top_index() {
        let mut app = app_with_stories(3);
        app.home.selection.set_index(1);
        app.open_item(2);
        assert_eq!(app.route(), Route::Item(2));
        assert_eq!(app.store.top_index(), Some(1));

        app.go_back();
        assert_eq!(app.route(), Route::Home);
        assert!(app.item.is_none());
        // In-memory selection survives; the durable copy is consumed
        assert_eq!(app.home.selection.selected(), Some(1));
        assert_eq!(app.store.top_index(), None);
    }
}

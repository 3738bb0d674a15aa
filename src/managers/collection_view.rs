//! Collection View for linkboard.
//!
//! Owns the user-driven view state (view mode, sort key and direction,
//! search term), derives filtered and sorted projections of a borrowed
//! bookmark collection, and debounces search input. The view never mutates
//! the collection itself.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::config::VIEW_KEY;
use crate::services::html_renderer;
use crate::services::storage::KeyValueStore;
use crate::types::bookmark::Bookmark;
use crate::types::view::{SortKey, ViewMode};

/// Runs only the last action scheduled within the delay window; scheduling a
/// new action aborts the pending one. Must be used inside a tokio runtime.
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedules `action` to run after the delay, superseding any action
    /// still waiting.
    pub fn call<F>(&mut self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        }));
    }
}

/// View state over a borrowed bookmark collection. The view mode survives
/// restarts through the shared key-value store.
pub struct CollectionView {
    store: Arc<dyn KeyValueStore>,
    view_mode: ViewMode,
    sort_key: SortKey,
    ascending: bool,
    search_term: String,
    debouncer: Debouncer,
}

impl CollectionView {
    /// Creates a view, restoring the persisted view mode (card by default).
    pub fn new(store: Arc<dyn KeyValueStore>, debounce_ms: u64) -> Self {
        let view_mode = store
            .get(VIEW_KEY)
            .and_then(|value| ViewMode::parse(&value))
            .unwrap_or_default();
        Self {
            store,
            view_mode,
            sort_key: SortKey::default(),
            ascending: true,
            search_term: String::new(),
            debouncer: Debouncer::new(Duration::from_millis(debounce_ms)),
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn ascending(&self) -> bool {
        self.ascending
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Flips card/table and persists the choice. Returns the new mode.
    pub fn toggle_view(&mut self) -> ViewMode {
        self.view_mode = self.view_mode.toggled();
        if let Err(err) = self.store.set(VIEW_KEY, self.view_mode.as_str()) {
            tracing::warn!("failed to persist view mode: {}", err);
        }
        self.view_mode
    }

    /// Sets the mode without persisting it (startup overrides).
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// The user-facing toggle label: names the mode a toggle switches to.
    pub fn toggle_label(&self) -> &'static str {
        match self.view_mode {
            ViewMode::Card => "Table View",
            ViewMode::Table => "Card View",
        }
    }

    /// Column-header selection: the same key flips direction, a different
    /// key takes over and resets to ascending.
    pub fn select_sort_key(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.ascending = !self.ascending;
        } else {
            self.sort_key = key;
            self.ascending = true;
        }
    }

    /// Sets key and direction outright (startup overrides).
    pub fn set_sort(&mut self, key: SortKey, ascending: bool) {
        self.sort_key = key;
        self.ascending = ascending;
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
    }

    /// Schedules a debounced action for a search-input change; only the last
    /// input within the window runs its action.
    pub fn debounce<F>(&mut self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.debouncer.call(action);
    }

    /// Case-insensitive substring filter over title, both descriptions, and
    /// link; a bookmark passes when any field matches. The empty term keeps
    /// the input unchanged.
    pub fn filter(bookmarks: &[Bookmark], term: &str) -> Vec<Bookmark> {
        let needle = term.to_lowercase();
        bookmarks
            .iter()
            .filter(|b| {
                b.title.to_lowercase().contains(&needle)
                    || b.short_description.to_lowercase().contains(&needle)
                    || b.long_description.to_lowercase().contains(&needle)
                    || b.link.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Stable lexicographic sort on the keyed field.
    pub fn sort(mut bookmarks: Vec<Bookmark>, key: SortKey, ascending: bool) -> Vec<Bookmark> {
        bookmarks.sort_by(|a, b| {
            let ordering = sort_field(a, key).cmp(sort_field(b, key));
            if ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });
        bookmarks
    }

    /// The collection as currently visible: filtered, then sorted.
    pub fn visible(&self, bookmarks: &[Bookmark]) -> Vec<Bookmark> {
        Self::sort(
            Self::filter(bookmarks, &self.search_term),
            self.sort_key,
            self.ascending,
        )
    }

    /// Renders the visible projection in the current mode.
    pub fn render(&self, bookmarks: &[Bookmark]) -> String {
        html_renderer::render(&self.visible(bookmarks), self.view_mode, bookmarks.len())
    }
}

fn sort_field(bookmark: &Bookmark, key: SortKey) -> &str {
    match key {
        SortKey::Title => &bookmark.title,
        SortKey::Description => &bookmark.short_description,
        SortKey::Link => &bookmark.link,
    }
}

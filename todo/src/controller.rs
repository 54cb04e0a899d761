//! The imperative todo controller.
//!
//! A single-threaded counterpart to [`TodoStore`](crate::TodoStore): it owns
//! an index-addressed list, persists the whole list after every mutation,
//! re-renders through a [`TodoView`] and tells an [`Announcer`] what
//! happened. Storage failures never reach the caller; they are logged and the
//! in-memory list carries on.

use crate::config::Config;
use crate::keyboard::{self, Focus, Key, KeyOutcome};
use crate::persistence;
use crate::types::TodoEntry;
use crate::view::{ItemView, TodoView};
use std::sync::Arc;
use todo_core::environment::Announcer;
use todo_core::storage::KeyValueStorage;

/// Imperative todo list controller
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use todo::announce::TracingAnnouncer;
/// use todo::view::NullView;
/// use todo::{Config, TodoController};
/// use todo_core::storage::MemoryStorage;
///
/// let mut controller = TodoController::load(
///     Arc::new(MemoryStorage::new()),
///     Arc::new(TracingAnnouncer),
///     NullView,
///     &Config::default(),
/// );
/// assert!(controller.add("  Buy milk "));
/// assert!(controller.toggle(0));
/// assert!(controller.entries()[0].completed);
/// ```
pub struct TodoController<V> {
    storage: Arc<dyn KeyValueStorage>,
    announcer: Arc<dyn Announcer>,
    view: V,
    key: String,
    entries: Vec<TodoEntry>,
    element_ids: Vec<u64>,
    next_element_id: u64,
    draft: String,
}

impl<V: TodoView> TodoController<V> {
    /// Load the persisted list and render it once
    pub fn load(
        storage: Arc<dyn KeyValueStorage>,
        announcer: Arc<dyn Announcer>,
        view: V,
        config: &Config,
    ) -> Self {
        let mut controller = Self {
            storage,
            announcer,
            view,
            key: config.controller_key.clone(),
            entries: Vec::new(),
            element_ids: Vec::new(),
            next_element_id: 1,
            draft: String::new(),
        };

        for entry in controller.load_todos() {
            controller.push(entry);
        }
        tracing::debug!(count = controller.entries.len(), "Todo controller loaded");
        controller.render();
        controller
    }

    /// Current entries in display order
    #[must_use]
    pub fn entries(&self) -> &[TodoEntry] {
        &self.entries
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The view this controller renders into
    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Append an entry
    ///
    /// Returns `false`, changing nothing, when the trimmed text is empty.
    /// Otherwise persists, clears the draft, re-renders and announces.
    pub fn add(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            tracing::debug!("Ignoring add with empty text");
            return false;
        }

        self.push(TodoEntry::new(text));
        self.save_todos();
        self.draft.clear();
        self.render();
        self.announcer.announce(&format!("Added task: {text}"));
        true
    }

    /// Flip completion of the entry at `index`
    ///
    /// Returns `false` for an out-of-range index.
    pub fn toggle(&mut self, index: usize) -> bool {
        let Some(entry) = self.entries.get_mut(index) else {
            tracing::debug!(index, "Toggle index out of range");
            return false;
        };
        entry.completed = !entry.completed;

        let message = if entry.completed {
            format!("Marked \"{}\" as complete", entry.text)
        } else {
            format!("Marked \"{}\" as incomplete", entry.text)
        };

        self.render();
        self.save_todos();
        self.announcer.announce(&message);
        true
    }

    /// Read the persisted list, or an empty list if it is missing or unreadable
    #[must_use]
    pub fn load_todos(&self) -> Vec<TodoEntry> {
        persistence::load_entries(self.storage.as_ref(), &self.key)
    }

    /// Persist the whole list; returns whether the write landed
    ///
    /// A failed write is logged and leaves the previously stored value alone.
    pub fn save_todos(&self) -> bool {
        persistence::save_entries(self.storage.as_ref(), &self.key, &self.entries)
    }

    /// Replace the input draft
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// The input draft
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Whether submitting the draft would add an entry
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    /// Add the draft as an entry
    pub fn submit(&mut self) -> bool {
        let draft = std::mem::take(&mut self.draft);
        let added = self.add(&draft);
        if !added {
            self.draft = draft;
        }
        added
    }

    /// Handle a key press with focus at `focus`
    ///
    /// Enter and Space toggle; arrow keys, Home and End return where focus
    /// should move. Anything else is [`KeyOutcome::Ignored`].
    pub fn handle_key(&mut self, focus: Focus, key: &Key) -> KeyOutcome {
        let outcome = keyboard::navigate(focus, key, self.entries.len());
        if let KeyOutcome::Toggled { index } = outcome {
            self.toggle(index);
        }
        outcome
    }

    /// Views of the current entries
    #[must_use]
    pub fn item_views(&self) -> Vec<ItemView> {
        self.entries
            .iter()
            .zip(&self.element_ids)
            .map(|(entry, id)| {
                ItemView::new(format!("todo-{id}"), &entry.text, entry.completed, false)
            })
            .collect()
    }

    fn push(&mut self, entry: TodoEntry) {
        self.entries.push(entry);
        self.element_ids.push(self.next_element_id);
        self.next_element_id += 1;
    }

    fn render(&mut self) {
        let items = self.item_views();
        self.view.render(&items);
    }
}

impl<V> std::fmt::Debug for TodoController<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoController")
            .field("key", &self.key)
            .field("entries", &self.entries)
            .field("draft", &self.draft)
            .finish_non_exhaustive()
    }
}

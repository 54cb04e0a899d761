//! The reactive todo store.
//!
//! [`TodoStore`] wraps the generic runtime [`Store`] with the todo reducer,
//! loads its initial list from storage, and persists the list through an
//! observer: every committed change to the list is written exactly once,
//! before the next action can commit.

use crate::config::Config;
use crate::persistence;
use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{Summary, Todo, TodoAction, TodoId, TodoState};
use crate::view::{self, ItemView, TodoView};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use todo_core::storage::KeyValueStorage;
use todo_runtime::{EffectHandle, Store, StoreConfig, StoreError, Subscription};

/// The runtime store specialised to the todo domain
pub type TodoRuntime = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// Reactive todo store with storage-backed persistence
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use todo::{Config, TodoStore};
/// use todo_core::storage::MemoryStorage;
///
/// # async fn example() -> Result<(), todo_runtime::StoreError> {
/// let store = TodoStore::open(Arc::new(MemoryStorage::new()), &Config::default()).await;
/// store.add("Buy milk").await?;
/// assert_eq!(store.summary().await.remaining_count, 4);
/// # Ok(())
/// # }
/// ```
pub struct TodoStore {
    store: TodoRuntime,
    key: String,
    _persistence: Subscription,
}

impl TodoStore {
    /// Open a store over `storage` with the default runtime configuration
    pub async fn open(storage: Arc<dyn KeyValueStorage>, config: &Config) -> Self {
        Self::open_with(storage, config, StoreConfig::default()).await
    }

    /// Open a store over `storage`
    ///
    /// The list under `config.store_key` is loaded once; missing or
    /// malformed data yields the default list. Nothing is written until the
    /// list first changes.
    pub async fn open_with(
        storage: Arc<dyn KeyValueStorage>,
        config: &Config,
        store_config: StoreConfig,
    ) -> Self {
        let key = config.store_key.clone();
        let initial = persistence::load_state(storage.as_ref(), &key);
        tracing::info!(key = %key, count = initial.len(), "Todo store opened");

        let store = Store::with_config(
            initial,
            TodoReducer::new(),
            TodoEnvironment::new(config.animation_duration()),
            store_config,
        );

        let persist_key = key.clone();
        let persistence = store
            .observe(
                |state: &TodoState| state.todos.clone(),
                move |todos: &Vec<Todo>| {
                    persistence::save_todos(storage.as_ref(), &persist_key, todos);
                },
            )
            .await;

        Self {
            store,
            key,
            _persistence: persistence,
        }
    }

    /// The underlying runtime store
    #[must_use]
    pub const fn runtime(&self) -> &TodoRuntime {
        &self.store
    }

    /// Storage key the list is persisted under
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Append an item; blank text is ignored
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    #[tracing::instrument(skip(self, text))]
    pub async fn add(&self, text: impl Into<String>) -> Result<EffectHandle, StoreError> {
        self.store.send(TodoAction::Add { text: text.into() }).await
    }

    /// Flip an item's completion
    ///
    /// The returned handle completes when the item's animation window closes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    #[tracing::instrument(skip(self))]
    pub async fn toggle(&self, id: TodoId) -> Result<EffectHandle, StoreError> {
        self.store.send(TodoAction::Toggle { id }).await
    }

    /// Delete an item; unknown ids are ignored
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, id: TodoId) -> Result<EffectHandle, StoreError> {
        self.store.send(TodoAction::Remove { id }).await
    }

    /// Delete every completed item
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn clear_completed(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(TodoAction::ClearCompleted).await
    }

    /// Mark every item completed
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn complete_all(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(TodoAction::CompleteAll).await
    }

    /// Restore the default list
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn reset(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(TodoAction::Reset).await
    }

    /// Set the loading display hint
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn set_loading(&self, loading: bool) -> Result<EffectHandle, StoreError> {
        self.store.send(TodoAction::SetLoading { loading }).await
    }

    /// Current items
    pub async fn todos(&self) -> Vec<Todo> {
        self.store.state(|s| s.todos.clone()).await
    }

    /// Copy of the whole state
    pub async fn snapshot(&self) -> TodoState {
        self.store.state(Clone::clone).await
    }

    /// Derived counts, from a single read
    pub async fn summary(&self) -> Summary {
        self.store.state(TodoState::summary).await
    }

    /// Number of completed items
    pub async fn completed_count(&self) -> usize {
        self.store.state(TodoState::completed_count).await
    }

    /// Number of items still to do
    pub async fn remaining_count(&self) -> usize {
        self.store.state(TodoState::remaining_count).await
    }

    /// At least one item, and all of them done
    pub async fn all_completed(&self) -> bool {
        self.store.state(TodoState::all_completed).await
    }

    /// Whether the loading hint is set
    pub async fn is_loading(&self) -> bool {
        self.store.state(|s| s.is_loading).await
    }

    /// Whether `id` is mid toggle-animation
    pub async fn is_animating(&self, id: TodoId) -> bool {
        self.store.state(|s| s.is_animating(id)).await
    }

    /// Views of the current items
    pub async fn item_views(&self) -> Vec<ItemView> {
        self.store.state(view::state_views).await
    }

    /// Render `view` now and after every change to the list or the
    /// animation set
    ///
    /// Changes to the loading hint alone do not re-render. Dropping the
    /// returned [`Subscription`] detaches the view. The view runs while the
    /// store is mid-commit and must not call back into the store.
    pub async fn on_change<V>(&self, mut sink: V) -> Subscription
    where
        V: TodoView + 'static,
    {
        self.store
            .observe_immediately(
                |state: &TodoState| (state.todos.clone(), state.just_toggled.clone()),
                move |(todos, animating): &(Vec<Todo>, BTreeSet<TodoId>)| {
                    sink.render(&view::item_views(todos, animating));
                },
            )
            .await
    }

    /// Stop accepting actions and wait for running animations to finish
    ///
    /// Animations already running still end in state, so no id is left in
    /// the animation set once this returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if animations are still
    /// running when `timeout` expires.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        self.store.shutdown(timeout).await
    }
}

impl std::fmt::Debug for TodoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoStore")
            .field("key", &self.key)
            .field("pending_effects", &self.store.pending_effects())
            .finish_non_exhaustive()
    }
}

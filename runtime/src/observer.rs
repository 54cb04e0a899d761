//! State observers.
//!
//! Observers are synchronous callbacks the [`Store`](crate::Store) runs after
//! every committed reducer step. They run while the store holds a read lock on
//! the freshly committed state: other readers can see the change, but no
//! further action can commit until every observer has returned. This gives
//! observers a strict commit-order view of state, which is what a persistence
//! subscriber needs.
//!
//! Observers must not call back into the store's async API; they cannot
//! `.await`, and a blocking wait on the store from inside an observer would
//! deadlock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

type ObserverFn<S> = Box<dyn FnMut(&S) + Send>;

/// Registry of observers attached to a store
pub(crate) struct ObserverRegistry<S> {
    next_id: AtomicU64,
    entries: Mutex<Vec<(u64, ObserverFn<S>)>>,
}

impl<S: 'static> ObserverRegistry<S> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Register an observer, returning the guard that detaches it
    pub(crate) fn insert(self: &Arc<Self>, observer: ObserverFn<S>) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, observer));

        let registry: Weak<dyn Detach> = Arc::downgrade(self) as Weak<dyn Detach>;
        Subscription { id, registry }
    }

    /// Run every observer against the committed state
    pub(crate) fn notify(&self, state: &S) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        for (_, observer) in entries.iter_mut() {
            observer(state);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

trait Detach: Send + Sync {
    fn detach(&self, id: u64);
}

impl<S: 'static> Detach for ObserverRegistry<S> {
    fn detach(&self, id: u64) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(entry_id, _)| *entry_id != id);
    }
}

/// Guard for a registered observer
///
/// The observer stays attached for as long as the guard lives. Dropping the
/// guard detaches it; dropping it after the store is gone is a no-op.
#[must_use = "dropping a Subscription detaches the observer immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<dyn Detach>,
}

impl Subscription {
    /// Identifier of the observer, unique within its store
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.detach(self.id);
            tracing::trace!(observer_id = self.id, "Observer detached");
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("attached", &(self.registry.strong_count() > 0))
            .finish()
    }
}

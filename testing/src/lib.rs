//! # Composable Todo Testing
//!
//! Testing utilities and helpers for the composable todo architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A Given-When-Then harness for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use todo_testing::{assertions, ReducerTest};
//!
//! ReducerTest::new(TodoReducer::new())
//!     .with_env(TodoEnvironment::default())
//!     .given_state(TodoState::empty())
//!     .when_action(TodoAction::Add { text: "Buy milk".into() })
//!     .then_state(|state| assert_eq!(state.todos.len(), 1))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use todo_core::environment::Clock;

/// Given-When-Then testing for reducers
pub mod reducer_test;

pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Mutex, PoisonError};
    use todo_core::environment::Announcer;
    use todo_core::storage::{KeyValueStorage, MemoryStorage, StorageError};

    /// 2025-01-01 00:00:00 UTC
    fn epoch() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// Clock that only moves when told to
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use todo_core::environment::Clock;
    /// use todo_testing::mocks::ManualClock;
    ///
    /// let clock = ManualClock::new();
    /// let start = clock.now();
    /// clock.advance(Duration::from_millis(1000));
    /// assert_eq!((clock.now() - start).num_milliseconds(), 1000);
    /// ```
    #[derive(Debug)]
    pub struct ManualClock {
        time: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        /// Create a manual clock at 2025-01-01 00:00:00 UTC
        #[must_use]
        pub fn new() -> Self {
            Self {
                time: Mutex::new(epoch()),
            }
        }

        /// Move the clock forward
        pub fn advance(&self, by: std::time::Duration) {
            let delta = chrono::TimeDelta::from_std(by).unwrap_or(chrono::TimeDelta::MAX);
            let mut time = self.time.lock().unwrap_or_else(PoisonError::into_inner);
            *time = time.checked_add_signed(delta).unwrap_or(DateTime::<Utc>::MAX_UTC);
        }
    }

    impl Default for ManualClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.time.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    /// Announcer that records every message
    #[derive(Debug, Default)]
    pub struct RecordingAnnouncer {
        messages: Mutex<Vec<String>>,
    }

    impl RecordingAnnouncer {
        /// Create an empty recorder
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// All messages announced so far, oldest first
        #[must_use]
        pub fn messages(&self) -> Vec<String> {
            self.messages
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// The most recent message
        #[must_use]
        pub fn last(&self) -> Option<String> {
            self.messages
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .last()
                .cloned()
        }
    }

    impl Announcer for RecordingAnnouncer {
        fn announce(&self, message: &str) {
            self.messages
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(message.to_string());
        }
    }

    /// Storage whose reads and writes can be switched to fail
    ///
    /// Wraps a [`MemoryStorage`] and counts successful writes, which makes it
    /// suitable for asserting how often a component persists.
    #[derive(Debug, Default)]
    pub struct FailingStorage {
        inner: MemoryStorage,
        fail_reads: AtomicBool,
        fail_writes: AtomicBool,
        writes: AtomicUsize,
    }

    impl FailingStorage {
        /// Create a storage that initially works
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a storage pre-populated with `value` under `key`
        #[must_use]
        pub fn with_value(key: &str, value: &str) -> Self {
            let storage = Self::new();
            // MemoryStorage without a quota never fails
            let _ = storage.inner.set(key, value);
            storage
        }

        /// Make subsequent reads fail with [`StorageError::Unavailable`]
        pub fn fail_reads(&self, fail: bool) {
            self.fail_reads.store(fail, Ordering::SeqCst);
        }

        /// Make subsequent writes fail with [`StorageError::QuotaExceeded`]
        pub fn fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }

        /// Number of successful writes
        #[must_use]
        pub fn write_count(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        /// Value currently stored under `key`, bypassing failure injection
        #[must_use]
        pub fn peek(&self, key: &str) -> Option<String> {
            self.inner.get(key).ok().flatten()
        }
    }

    impl KeyValueStorage for FailingStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(StorageError::Unavailable("reads disabled".to_string()));
            }
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StorageError::QuotaExceeded {
                    needed: key.len() + value.len(),
                    available: 0,
                });
            }
            self.inner.set(key, value)?;
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }
    }
}

// Re-export commonly used items
pub use mocks::{FailingStorage, ManualClock, RecordingAnnouncer};

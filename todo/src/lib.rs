//! To-do list state with local persistence.
//!
//! The same domain is offered in two forms:
//!
//! - [`TodoController`]: an imperative, single-threaded controller over an
//!   index-addressed list. Every mutation persists the whole list, re-renders
//!   through a [`TodoView`] and is announced for screen readers.
//! - [`TodoStore`]: a reactive store built on the composable runtime. Actions
//!   run through [`TodoReducer`]; derived counts are read from state; the list
//!   is persisted by an observer; a toggled item stays in an animation set
//!   until a delayed effect removes it.
//!
//! Storage is any [`KeyValueStorage`](todo_core::storage::KeyValueStorage).
//! Load and save failures are logged and never surface to callers.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use todo::{Config, TodoId, TodoStore};
//! use todo_core::storage::MemoryStorage;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = TodoStore::open(Arc::new(MemoryStorage::new()), &Config::default()).await;
//!
//! store.reset().await?;
//! store.add("Buy milk").await?;
//! store.toggle(TodoId::new(3)).await?;
//!
//! let summary = store.summary().await;
//! println!("Completed: {}", summary.completed_count);
//! println!("Remaining: {}", summary.remaining_count);
//! # Ok(())
//! # }
//! ```

pub mod announce;
pub mod config;
pub mod controller;
pub mod error;
pub mod keyboard;
pub mod persistence;
pub mod reducer;
pub mod store;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use config::Config;
pub use controller::TodoController;
pub use error::PersistenceError;
pub use keyboard::{Focus, Key, KeyOutcome};
pub use reducer::{TodoEnvironment, TodoReducer};
pub use store::{TodoRuntime, TodoStore};
pub use types::{Summary, Todo, TodoAction, TodoEntry, TodoId, TodoState, default_todos};
pub use view::{ItemView, TodoView};

//! Error types for loading and saving todo lists.

use thiserror::Error;
use todo_core::storage::StorageError;

/// Errors that can occur while reading or writing a persisted list
///
/// These never reach callers of the controller or the store: both degrade
/// to a fallback list (on load) or keep the previous value (on save) and log
/// the error instead.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The storage backend failed
    #[error("Storage failed: {0}")]
    Storage(#[from] StorageError),

    /// The stored value is not the expected JSON shape
    #[error("Malformed persisted list: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The stored value parsed but breaks a list invariant
    #[error("Invalid persisted list: {0}")]
    Invalid(String),
}

//! Reading and writing persisted todo lists.
//!
//! Both layouts are plain JSON arrays:
//!
//! - store layout: `[{"id": 1, "text": "Run", "completed": false}, ...]`
//! - controller layout: `[{"text": "Run", "completed": false}, ...]`
//!
//! The strict functions (`decode_*`, `read_*`, `write_*`) report every
//! failure as a [`PersistenceError`]. The `load_*`/`save_*` functions wrap
//! them for callers that must keep going: failures are logged at `warn` and
//! replaced by a fallback.

use crate::error::PersistenceError;
use crate::types::{Todo, TodoEntry, TodoState};
use std::collections::HashSet;
use todo_core::storage::KeyValueStorage;

/// Parse and validate a list in the store layout
///
/// # Errors
///
/// - [`PersistenceError::Malformed`]: not a JSON array of items
/// - [`PersistenceError::Invalid`]: an empty text or a duplicate id
pub fn decode_todos(raw: &str) -> Result<Vec<Todo>, PersistenceError> {
    let todos: Vec<Todo> = serde_json::from_str(raw)?;
    validate_todos(&todos)?;
    Ok(todos)
}

/// Serialize a list in the store layout
///
/// # Errors
///
/// Returns [`PersistenceError::Malformed`] if serialization fails.
pub fn encode_todos(todos: &[Todo]) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(todos)?)
}

/// Check the invariants a stored list must hold
///
/// # Errors
///
/// Returns [`PersistenceError::Invalid`] naming the first offending item.
pub fn validate_todos(todos: &[Todo]) -> Result<(), PersistenceError> {
    let mut seen = HashSet::with_capacity(todos.len());
    for todo in todos {
        if todo.text.trim().is_empty() {
            return Err(PersistenceError::Invalid(format!(
                "todo {} has empty text",
                todo.id
            )));
        }
        if !seen.insert(todo.id) {
            return Err(PersistenceError::Invalid(format!(
                "duplicate todo id {}",
                todo.id
            )));
        }
    }
    Ok(())
}

/// Parse and validate a list in the controller layout
///
/// # Errors
///
/// - [`PersistenceError::Malformed`]: not a JSON array of entries
/// - [`PersistenceError::Invalid`]: an entry with empty text
pub fn decode_entries(raw: &str) -> Result<Vec<TodoEntry>, PersistenceError> {
    let entries: Vec<TodoEntry> = serde_json::from_str(raw)?;
    if let Some(index) = entries.iter().position(|e| e.text.trim().is_empty()) {
        return Err(PersistenceError::Invalid(format!(
            "entry {index} has empty text"
        )));
    }
    Ok(entries)
}

/// Serialize a list in the controller layout
///
/// # Errors
///
/// Returns [`PersistenceError::Malformed`] if serialization fails.
pub fn encode_entries(entries: &[TodoEntry]) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(entries)?)
}

/// Read the store-layout list under `key`; `Ok(None)` when nothing is stored
///
/// # Errors
///
/// Returns a [`PersistenceError`] if the storage fails or the value is
/// malformed or invalid.
pub fn read_todos(
    storage: &dyn KeyValueStorage,
    key: &str,
) -> Result<Option<Vec<Todo>>, PersistenceError> {
    storage.get(key)?.as_deref().map(decode_todos).transpose()
}

/// Write the store-layout list under `key`
///
/// # Errors
///
/// Returns a [`PersistenceError`] if serialization or storage fails. The
/// previous value is left in place.
pub fn write_todos(
    storage: &dyn KeyValueStorage,
    key: &str,
    todos: &[Todo],
) -> Result<(), PersistenceError> {
    let raw = encode_todos(todos)?;
    storage.set(key, &raw)?;
    Ok(())
}

/// Read the controller-layout list under `key`; `Ok(None)` when nothing is stored
///
/// # Errors
///
/// Returns a [`PersistenceError`] if the storage fails or the value is
/// malformed or invalid.
pub fn read_entries(
    storage: &dyn KeyValueStorage,
    key: &str,
) -> Result<Option<Vec<TodoEntry>>, PersistenceError> {
    storage.get(key)?.as_deref().map(decode_entries).transpose()
}

/// Write the controller-layout list under `key`
///
/// # Errors
///
/// Returns a [`PersistenceError`] if serialization or storage fails. The
/// previous value is left in place.
pub fn write_entries(
    storage: &dyn KeyValueStorage,
    key: &str,
    entries: &[TodoEntry],
) -> Result<(), PersistenceError> {
    let raw = encode_entries(entries)?;
    storage.set(key, &raw)?;
    Ok(())
}

/// Initial store state from `key`, falling back to the default list
///
/// An empty stored array is kept as an empty list.
#[must_use]
pub fn load_state(storage: &dyn KeyValueStorage, key: &str) -> TodoState {
    match read_todos(storage, key) {
        Ok(Some(todos)) => {
            tracing::debug!(key, count = todos.len(), "Loaded persisted todos");
            TodoState::from_todos(todos)
        },
        Ok(None) => {
            tracing::debug!(key, "Nothing persisted, starting from defaults");
            TodoState::defaults()
        },
        Err(error) => {
            tracing::warn!(key, %error, "Failed to load todos, starting from defaults");
            TodoState::defaults()
        },
    }
}

/// Write `todos`, logging instead of failing; returns whether the write landed
pub fn save_todos(storage: &dyn KeyValueStorage, key: &str, todos: &[Todo]) -> bool {
    match write_todos(storage, key, todos) {
        Ok(()) => {
            tracing::trace!(key, count = todos.len(), "Persisted todos");
            true
        },
        Err(error) => {
            tracing::warn!(key, %error, "Failed to save todos");
            false
        },
    }
}

/// Controller entries from `key`, or an empty list on any failure
#[must_use]
pub fn load_entries(storage: &dyn KeyValueStorage, key: &str) -> Vec<TodoEntry> {
    match read_entries(storage, key) {
        Ok(entries) => entries.unwrap_or_default(),
        Err(error) => {
            tracing::warn!(key, %error, "Failed to load todos");
            Vec::new()
        },
    }
}

/// Write controller entries, logging instead of failing; returns whether the write landed
pub fn save_entries(storage: &dyn KeyValueStorage, key: &str, entries: &[TodoEntry]) -> bool {
    match write_entries(storage, key, entries) {
        Ok(()) => true,
        Err(error) => {
            tracing::warn!(key, %error, "Failed to save todos");
            false
        },
    }
}

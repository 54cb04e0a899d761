//! Domain types for the todo list.
//!
//! Two shapes of item live here: [`Todo`], the id-carrying item owned by the
//! reactive store, and [`TodoEntry`], the index-addressed record owned by the
//! imperative controller.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identifier of a todo item
///
/// Ids are assigned from a counter starting at 1 and are never reused, even
/// after the item they named is removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// The first id handed out by an empty list
    pub const FIRST: Self = Self(1);

    /// Creates a `TodoId` from its numeric value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The id following this one, or `None` once the id space is exhausted
    #[must_use]
    pub const fn checked_next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(next) => Some(Self(next)),
            None => None,
        }
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier
    pub id: TodoId,
    /// What needs doing, never empty after trimming
    pub text: String,
    /// Whether the item is done
    pub completed: bool,
}

impl Todo {
    /// Creates a new, incomplete todo
    #[must_use]
    pub fn new(id: TodoId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }

    fn seeded(id: u64, text: &str, completed: bool) -> Self {
        Self {
            id: TodoId(id),
            text: text.to_string(),
            completed,
        }
    }
}

/// The list a fresh installation starts with, and the one `reset` restores
#[must_use]
pub fn default_todos() -> Vec<Todo> {
    vec![
        Todo::seeded(1, "Buy new sweatshirt", true),
        Todo::seeded(2, "Read an article", true),
        Todo::seeded(3, "Write blog post", false),
        Todo::seeded(4, "Watch \"Mr Robot\"", false),
        Todo::seeded(5, "Run", false),
    ]
}

/// An item as the imperative controller stores it: addressed by position,
/// persisted without an id
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoEntry {
    /// What needs doing, never empty after trimming
    pub text: String,
    /// Whether the item is done
    pub completed: bool,
}

impl TodoEntry {
    /// Creates a new, incomplete entry
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }
}

/// State of the reactive todo store
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoState {
    /// Items in display order
    pub todos: Vec<Todo>,
    /// The id the next added item receives
    pub next_id: TodoId,
    /// Display hint only; never gates an operation
    pub is_loading: bool,
    /// Ids currently mid toggle-animation; never persisted
    pub just_toggled: BTreeSet<TodoId>,
}

impl TodoState {
    /// A state with no items
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            todos: Vec::new(),
            next_id: TodoId::FIRST,
            is_loading: false,
            just_toggled: BTreeSet::new(),
        }
    }

    /// A state holding the default list
    #[must_use]
    pub fn defaults() -> Self {
        Self::from_todos(default_todos())
    }

    /// A state holding `todos`, with the counter one past the largest id
    #[must_use]
    pub fn from_todos(todos: Vec<Todo>) -> Self {
        let next_id = next_id_after(&todos);
        Self {
            todos,
            next_id,
            ..Self::empty()
        }
    }

    /// Returns an item by id
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.todos.len()
    }

    /// Whether the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Number of completed items
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }

    /// Number of items still to do
    #[must_use]
    pub fn remaining_count(&self) -> usize {
        self.todos.iter().filter(|t| !t.completed).count()
    }

    /// True when there is at least one item and every item is done
    #[must_use]
    pub fn all_completed(&self) -> bool {
        !self.todos.is_empty() && self.remaining_count() == 0
    }

    /// Whether `id` is mid toggle-animation
    #[must_use]
    pub fn is_animating(&self, id: TodoId) -> bool {
        self.just_toggled.contains(&id)
    }

    /// All derived counts, read together
    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary {
            completed_count: self.completed_count(),
            remaining_count: self.remaining_count(),
            all_completed: self.all_completed(),
        }
    }
}

impl Default for TodoState {
    fn default() -> Self {
        Self::empty()
    }
}

/// Counter value following the largest id in `todos`, or [`TodoId::FIRST`]
#[must_use]
pub fn next_id_after(todos: &[Todo]) -> TodoId {
    todos
        .iter()
        .map(|t| t.id)
        .max()
        .and_then(TodoId::checked_next)
        .unwrap_or(TodoId::FIRST)
}

/// Derived values of a todo list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    /// Number of completed items
    pub completed_count: usize,
    /// Number of items still to do
    pub remaining_count: usize,
    /// At least one item, and all of them done
    pub all_completed: bool,
}

/// Inputs to the todo reducer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    /// Append a new item; ignored when the trimmed text is empty
    Add {
        /// Raw input text
        text: String,
    },

    /// Flip an item's completion and start its animation window
    Toggle {
        /// Item to toggle
        id: TodoId,
    },

    /// Delete an item
    Remove {
        /// Item to delete
        id: TodoId,
    },

    /// Delete every completed item
    ClearCompleted,

    /// Mark every item completed
    CompleteAll,

    /// Restore the default list
    Reset,

    /// Set the loading display hint
    SetLoading {
        /// New flag value
        loading: bool,
    },

    /// End of an item's toggle animation, fed back by a delayed effect
    AnimationFinished {
        /// Item whose animation ended
        id: TodoId,
    },
}

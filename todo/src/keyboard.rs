//! Keyboard navigation over the rendered list.
//!
//! Focus decisions are pure: given where focus is, which key was pressed and
//! how long the list is, [`navigate`] says what should happen. The controller
//! applies the outcome.

/// A key press, as reported by the front end
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    /// Enter / Return
    Enter,
    /// The space bar
    Space,
    /// Arrow up
    ArrowUp,
    /// Arrow down
    ArrowDown,
    /// Home
    Home,
    /// End
    End,
    /// Anything else, by its key name
    Other(String),
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value onto a [`Key`]
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "Home" => Self::Home,
            "End" => Self::End,
            other => Self::Other(other.to_string()),
        }
    }

    const fn activates(&self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

/// Where keyboard focus currently is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    /// On the list item at this index
    Item(usize),
    /// On the toggle control inside the item at this index
    Toggle(usize),
    /// Anywhere outside the list
    Elsewhere,
}

/// What a key press did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The item at `index` was toggled
    Toggled {
        /// Toggled item
        index: usize,
    },
    /// Focus should move to the item at `index`
    FocusMoved {
        /// Newly focused item
        index: usize,
    },
    /// The key was not handled
    Ignored,
}

impl KeyOutcome {
    /// Whether the front end should suppress the key's default action
    #[must_use]
    pub const fn prevents_default(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Decide what `key` does when focus is at `focus` in a list of `len` items
///
/// Enter and Space toggle the focused item, whether focus is on the item or
/// its toggle control. Arrow keys move between items, wrapping at both ends;
/// Home and End jump to the first and last item. Arrow, Home and End keys
/// only act when an item itself has focus.
#[must_use]
pub fn navigate(focus: Focus, key: &Key, len: usize) -> KeyOutcome {
    let (index, on_item) = match focus {
        Focus::Item(index) => (index, true),
        Focus::Toggle(index) => (index, false),
        Focus::Elsewhere => return KeyOutcome::Ignored,
    };
    if index >= len {
        return KeyOutcome::Ignored;
    }

    if key.activates() {
        return KeyOutcome::Toggled { index };
    }
    if !on_item {
        return KeyOutcome::Ignored;
    }

    let last = len - 1;
    let target = match key {
        Key::ArrowDown => {
            if index < last {
                index + 1
            } else {
                0
            }
        },
        Key::ArrowUp => {
            if index > 0 {
                index - 1
            } else {
                last
            }
        },
        Key::Home => 0,
        Key::End => last,
        _ => return KeyOutcome::Ignored,
    };
    KeyOutcome::FocusMoved { index: target }
}

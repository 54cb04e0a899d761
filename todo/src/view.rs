//! View model shared by the controller and the store.
//!
//! An [`ItemView`] is everything an accessibility-aware front end needs to
//! draw one item: ids for `aria-describedby`, the state-dependent emoji and
//! labels, and ready-made markup with the text escaped.

use crate::types::{Todo, TodoId, TodoState};
use std::collections::BTreeSet;
use std::fmt::Write as _;

/// Escape text for insertion into HTML markup
///
/// Exactly `&`, `<`, `>`, `"` and `'` are replaced; everything else is
/// copied through.
///
/// # Example
///
/// ```
/// use todo::view::escape_html;
///
/// assert_eq!(escape_html("<b>Tom & Jerry's</b>"), "&lt;b&gt;Tom &amp; Jerry&#039;s&lt;/b&gt;");
/// ```
#[must_use]
pub fn escape_html(unsafe_text: &str) -> String {
    let mut escaped = String::with_capacity(unsafe_text.len());
    for c in unsafe_text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Presentation of a single item
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemView {
    /// Element id of the list item, e.g. `todo-3`
    pub element_id: String,
    /// Element id of the hidden status text, e.g. `todo-3-status`
    pub status_id: String,
    /// Raw item text
    pub text: String,
    /// Item text escaped for markup
    pub escaped_text: String,
    /// Whether the item is done
    pub completed: bool,
    /// Whether the item is mid toggle-animation
    pub animating: bool,
    /// CSS classes of the list item
    pub classes: String,
    /// Emoji shown on the toggle control
    pub emoji: &'static str,
    /// CSS classes of the toggle control
    pub emoji_classes: &'static str,
    /// `aria-label` of the toggle control, naming what pressing it does
    pub aria_label: &'static str,
    /// `data-status` attribute of the toggle control
    pub data_status: &'static str,
    /// Text of the hidden status element
    pub status_text: &'static str,
    /// The rendered `<li>` element
    pub markup: String,
}

impl ItemView {
    /// Build the view of one item
    #[must_use]
    pub fn new(
        element_id: impl Into<String>,
        text: &str,
        completed: bool,
        animating: bool,
    ) -> Self {
        let element_id = element_id.into();
        let status_id = format!("{element_id}-status");

        let mut classes = String::from("todo-item");
        if completed {
            classes.push_str(" completed");
        }
        if animating {
            classes.push_str(" just-toggled");
        }

        let (emoji, emoji_classes, aria_label, data_status, status_text) = if completed {
            ("😊", "emoji happy", "Mark as incomplete", "completed", "Completed task")
        } else {
            ("😕", "emoji sad", "Mark as complete", "incomplete", "Incomplete task")
        };

        let escaped_text = escape_html(text);
        let markup = format!(
            concat!(
                r#"<li id="{id}" class="{classes}" role="listitem" tabindex="0" "#,
                r#"aria-describedby="{status_id}">"#,
                r#"<span class="todo-text">{text}</span>"#,
                r#"<button class="{emoji_classes}" aria-label="{aria_label}" "#,
                r#"data-status="{data_status}">{emoji}</button>"#,
                r#"<span id="{status_id}" class="visually-hidden">{status_text}</span>"#,
                "</li>"
            ),
            id = element_id,
            classes = classes,
            status_id = status_id,
            text = escaped_text,
            emoji_classes = emoji_classes,
            aria_label = aria_label,
            data_status = data_status,
            emoji = emoji,
            status_text = status_text,
        );

        Self {
            element_id,
            status_id,
            text: text.to_string(),
            escaped_text,
            completed,
            animating,
            classes,
            emoji,
            emoji_classes,
            aria_label,
            data_status,
            status_text,
            markup,
        }
    }
}

/// Views of store items, with element ids `todo-{id}`
#[must_use]
pub fn item_views(todos: &[Todo], animating: &BTreeSet<TodoId>) -> Vec<ItemView> {
    todos
        .iter()
        .map(|todo| {
            ItemView::new(
                format!("todo-{}", todo.id),
                &todo.text,
                todo.completed,
                animating.contains(&todo.id),
            )
        })
        .collect()
}

/// Views of every item in a store state
#[must_use]
pub fn state_views(state: &TodoState) -> Vec<ItemView> {
    item_views(&state.todos, &state.just_toggled)
}

/// Render a whole list as a `<ul>` element
#[must_use]
pub fn render_list(items: &[ItemView]) -> String {
    let mut out = String::from(r#"<ul class="todo-list" role="list">"#);
    for item in items {
        let _ = write!(out, "{}", item.markup);
    }
    out.push_str("</ul>");
    out
}

/// Consumer of rendered item views
///
/// Any `FnMut(&[ItemView]) + Send` closure is a `TodoView`.
pub trait TodoView: Send {
    /// Draw the current list
    fn render(&mut self, items: &[ItemView]);
}

impl<F> TodoView for F
where
    F: FnMut(&[ItemView]) + Send,
{
    fn render(&mut self, items: &[ItemView]) {
        self(items);
    }
}

/// View that discards every render
#[derive(Debug, Clone, Copy, Default)]
pub struct NullView;

impl TodoView for NullView {
    fn render(&mut self, _items: &[ItemView]) {}
}

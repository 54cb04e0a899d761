//! Reducer logic for the reactive todo store.
//!
//! Every operation is a single reducer step. The only effect ever produced is
//! the delayed `AnimationFinished` that closes a toggle's animation window.

use crate::types::{Todo, TodoAction, TodoId, TodoState, default_todos, next_id_after};
use std::time::Duration;
use todo_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// Environment dependencies for the todo reducer
#[derive(Clone, Debug)]
pub struct TodoEnvironment {
    /// How long a toggled item stays in the animation set
    pub animation_duration: Duration,
}

impl TodoEnvironment {
    /// Animation window used when nothing else is configured
    pub const DEFAULT_ANIMATION: Duration = Duration::from_millis(600);

    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub const fn new(animation_duration: Duration) -> Self {
        Self { animation_duration }
    }
}

impl Default for TodoEnvironment {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ANIMATION)
    }
}

/// Reducer for the todo list
#[derive(Clone, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn add(state: &mut TodoState, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            tracing::debug!("Ignoring add with empty text");
            return;
        }

        let id = state.next_id;
        if state.get(id).is_some() {
            tracing::warn!(%id, "Id counter collides with an existing item, add ignored");
            return;
        }
        let Some(following) = id.checked_next() else {
            tracing::warn!("Id space exhausted, add ignored");
            return;
        };

        state.todos.push(Todo::new(id, text));
        state.next_id = following;
        tracing::debug!(%id, "Todo added");
    }

    fn toggle(state: &mut TodoState, id: TodoId) {
        state.just_toggled.insert(id);
        match state.todos.iter_mut().find(|t| t.id == id) {
            Some(todo) => todo.completed = !todo.completed,
            None => tracing::debug!(%id, "Toggle of unknown todo"),
        }
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TodoAction::Add { text } => {
                Self::add(state, &text);
                SmallVec::new()
            },

            TodoAction::Toggle { id } => {
                Self::toggle(state, id);
                // Overlapping windows for the same id are not cancelled; the
                // earliest AnimationFinished ends the animation.
                smallvec![Effect::delay(
                    env.animation_duration,
                    TodoAction::AnimationFinished { id }
                )]
            },

            TodoAction::Remove { id } => {
                state.todos.retain(|t| t.id != id);
                SmallVec::new()
            },

            TodoAction::ClearCompleted => {
                state.todos.retain(|t| !t.completed);
                SmallVec::new()
            },

            TodoAction::CompleteAll => {
                for todo in &mut state.todos {
                    todo.completed = true;
                }
                SmallVec::new()
            },

            TodoAction::Reset => {
                state.todos = default_todos();
                state.next_id = next_id_after(&state.todos);
                SmallVec::new()
            },

            TodoAction::SetLoading { loading } => {
                state.is_loading = loading;
                SmallVec::new()
            },

            TodoAction::AnimationFinished { id } => {
                state.just_toggled.remove(&id);
                SmallVec::new()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_testing::{ReducerTest, assertions};

    fn env() -> TodoEnvironment {
        TodoEnvironment::default()
    }

    fn add(text: &str) -> TodoAction {
        TodoAction::Add {
            text: text.to_string(),
        }
    }

    #[test]
    fn test_add_appends_trimmed_item() {
        ReducerTest::new(TodoReducer::new())
            .with_env(env())
            .given_state(TodoState::empty())
            .when_action(add("  Buy milk  "))
            .then_state(|state| {
                assert_eq!(state.todos, vec![Todo::new(TodoId::new(1), "Buy milk")]);
                assert_eq!(state.next_id, TodoId::new(2));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_add_blank_text_is_ignored() {
        ReducerTest::new(TodoReducer::new())
            .with_env(env())
            .given_state(TodoState::defaults())
            .when_actions([add(""), add("   "), add("\t\n")])
            .then_state(|state| {
                assert_eq!(state, &TodoState::defaults());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_ids_are_not_reused_after_remove() {
        ReducerTest::new(TodoReducer::new())
            .with_env(env())
            .given_state(TodoState::empty())
            .when_actions([
                add("a"),
                add("b"),
                TodoAction::Remove { id: TodoId::new(2) },
                add("c"),
            ])
            .then_state(|state| {
                let ids: Vec<u64> = state.todos.iter().map(|t| t.id.get()).collect();
                assert_eq!(ids, [1, 3]);
                assert_eq!(state.next_id, TodoId::new(4));
            })
            .run();
    }

    #[test]
    fn test_add_skips_colliding_counter() {
        let mut state = TodoState::from_todos(vec![Todo::new(TodoId::new(1), "a")]);
        state.next_id = TodoId::new(1);

        ReducerTest::new(TodoReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(add("b"))
            .then_state(|state| assert_eq!(state.len(), 1))
            .run();
    }

    #[test]
    fn test_toggle_flips_and_schedules_cleanup() {
        ReducerTest::new(TodoReducer::new())
            .with_env(env())
            .given_state(TodoState::defaults())
            .when_action(TodoAction::Toggle { id: TodoId::new(3) })
            .then_state(|state| {
                assert_eq!(state.get(TodoId::new(3)).map(|t| t.completed), Some(true));
                assert!(state.is_animating(TodoId::new(3)));
            })
            .then_effects(|effects| {
                let (after, action) = assertions::expect_single_delay(effects);
                assert_eq!(after, Duration::from_millis(600));
                assert_eq!(
                    action,
                    &TodoAction::AnimationFinished { id: TodoId::new(3) }
                );
            })
            .run();
    }

    #[test]
    fn test_toggle_twice_restores_completion() {
        ReducerTest::new(TodoReducer::new())
            .with_env(env())
            .given_state(TodoState::defaults())
            .when_actions([
                TodoAction::Toggle { id: TodoId::new(1) },
                TodoAction::Toggle { id: TodoId::new(1) },
            ])
            .then_state(|state| {
                assert_eq!(state.todos, TodoState::defaults().todos);
                assert!(state.is_animating(TodoId::new(1)));
            })
            .then_effects(|effects| {
                assert_eq!(assertions::delayed_actions(effects).len(), 2);
            })
            .run();
    }

    #[test]
    fn test_toggle_unknown_id_leaves_list_alone() {
        ReducerTest::new(TodoReducer::new())
            .with_env(env())
            .given_state(TodoState::defaults())
            .when_action(TodoAction::Toggle { id: TodoId::new(99) })
            .then_state(|state| {
                assert_eq!(state.todos, TodoState::defaults().todos);
                assert!(state.is_animating(TodoId::new(99)));
            })
            .then_effects(|effects| {
                let _ = assertions::expect_single_delay(effects);
            })
            .run();
    }

    #[test]
    fn test_animation_finished_is_idempotent() {
        ReducerTest::new(TodoReducer::new())
            .with_env(env())
            .given_state(TodoState::defaults())
            .when_actions([
                TodoAction::Toggle { id: TodoId::new(2) },
                TodoAction::AnimationFinished { id: TodoId::new(2) },
                TodoAction::AnimationFinished { id: TodoId::new(2) },
            ])
            .then_state(|state| {
                assert!(state.just_toggled.is_empty());
                assert_eq!(state.get(TodoId::new(2)).map(|t| t.completed), Some(false));
            })
            .run();
    }

    #[test]
    fn test_clear_completed_keeps_incomplete() {
        let mut state = TodoState::from_todos(vec![
            Todo::new(TodoId::new(1), "done"),
            Todo::new(TodoId::new(2), "also done"),
            Todo::new(TodoId::new(3), "open"),
        ]);
        state.todos[0].completed = true;
        state.todos[1].completed = true;

        ReducerTest::new(TodoReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(TodoAction::ClearCompleted)
            .then_state(|state| {
                assert_eq!(state.todos, vec![Todo::new(TodoId::new(3), "open")]);
                assert_eq!(state.next_id, TodoId::new(4));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_complete_all_then_all_completed() {
        ReducerTest::new(TodoReducer::new())
            .with_env(env())
            .given_state(TodoState::defaults())
            .when_action(TodoAction::CompleteAll)
            .then_state(|state| {
                assert!(state.all_completed());
                assert_eq!(state.remaining_count(), 0);
            })
            .run();
    }

    #[test]
    fn test_reset_restores_defaults() {
        ReducerTest::new(TodoReducer::new())
            .with_env(env())
            .given_state(TodoState::empty())
            .when_actions([add("x"), TodoAction::Reset])
            .then_state(|state| {
                assert_eq!(state.todos, default_todos());
                assert_eq!(state.next_id, TodoId::new(6));
                assert_eq!(state.remaining_count(), 3);
                assert_eq!(state.completed_count(), 2);
            })
            .run();
    }

    #[test]
    fn test_set_loading_only_touches_flag() {
        ReducerTest::new(TodoReducer::new())
            .with_env(env())
            .given_state(TodoState::defaults())
            .when_action(TodoAction::SetLoading { loading: true })
            .then_state(|state| {
                assert!(state.is_loading);
                assert_eq!(state.todos, default_todos());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_two_adds_then_toggle() {
        ReducerTest::new(TodoReducer::new())
            .with_env(env())
            .given_state(TodoState::empty())
            .when_actions([
                add("Buy milk"),
                add("Walk dog"),
                TodoAction::Toggle { id: TodoId::new(1) },
            ])
            .then_state(|state| {
                assert_eq!(state.completed_count(), 1);
                assert_eq!(state.remaining_count(), 1);
                assert!(!state.all_completed());
                assert_eq!(state.todos[1], Todo::new(TodoId::new(2), "Walk dog"));
            })
            .run();
    }
}

//! Ergonomic testing utilities for reducers
//!
//! This module provides a fluent API for testing reducers with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use todo_core::{effect::Effect, reducer::Reducer};

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for effect assertion functions
type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// Several actions may be queued with [`when_action`](Self::when_action) or
/// [`when_actions`](Self::when_actions); they are reduced in order against the
/// same state, and effect assertions see the effects of every action,
/// concatenated in dispatch order.
///
/// # Example
///
/// ```ignore
/// use todo_testing::ReducerTest;
///
/// ReducerTest::new(TodoReducer::new())
///     .with_env(TodoEnvironment::default())
///     .given_state(TodoState::defaults())
///     .when_action(TodoAction::Toggle { id: TodoId::new(3) })
///     .then_state(|state| {
///         assert_eq!(state.completed_count(), 3);
///     })
///     .then_effects(|effects| {
///         assert_eq!(effects.len(), 1);
///     })
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    actions: Vec<A>,
    state_assertions: Vec<StateAssertion<S>>,
    effect_assertions: Vec<EffectAssertion<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            actions: Vec::new(),
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Queue an action (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.actions.push(action);
        self
    }

    /// Queue several actions, reduced in order (When)
    #[must_use]
    pub fn when_actions(mut self, actions: impl IntoIterator<Item = A>) -> Self {
        self.actions.extend(actions);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the resulting effects (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state, environment, or at least one action is not
    /// set, or if any assertions fail.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        assert!(
            !self.actions.is_empty(),
            "At least one action must be set with when_action()"
        );

        let mut effects = Vec::new();
        for action in self.actions {
            effects.extend(self.reducer.reduce(&mut state, action, &env));
        }

        for assertion in self.state_assertions {
            assertion(&state);
        }

        for assertion in self.effect_assertions {
            assertion(&effects);
        }
    }
}

/// Helper assertions for effects
pub mod assertions {
    use std::time::Duration;
    use todo_core::effect::Effect;

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if any effect other than `Effect::None` is present.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(Effect::is_none),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Collect every delayed action, in order
    #[must_use]
    pub fn delayed_actions<A>(effects: &[Effect<A>]) -> Vec<(Duration, &A)> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Delay { duration, action } => Some((*duration, action.as_ref())),
                _ => None,
            })
            .collect()
    }

    /// Find the single delayed action among `effects`
    ///
    /// # Panics
    ///
    /// Panics unless exactly one `Delay` effect is present.
    #[allow(clippy::panic)] // Test assertion
    #[must_use]
    pub fn expect_single_delay<A: std::fmt::Debug>(effects: &[Effect<A>]) -> (Duration, &A) {
        match delayed_actions(effects).as_slice() {
            [single] => *single,
            other => panic!(
                "Expected exactly one Delay effect, found {}: {effects:?}",
                other.len()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::{SmallVec, smallvec};
    use std::collections::BTreeSet;
    use std::time::Duration;

    #[derive(Clone, Debug, Default)]
    struct FlashState {
        lit: BTreeSet<u8>,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum FlashAction {
        Flash(u8),
        Fade(u8),
    }

    struct FlashReducer;

    impl Reducer for FlashReducer {
        type State = FlashState;
        type Action = FlashAction;
        type Environment = Duration;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            fade_after: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                FlashAction::Flash(n) => {
                    state.lit.insert(n);
                    smallvec![Effect::delay(*fade_after, FlashAction::Fade(n))]
                },
                FlashAction::Fade(n) => {
                    state.lit.remove(&n);
                    smallvec![Effect::None]
                },
            }
        }
    }

    #[test]
    fn single_action_reports_its_delay() {
        ReducerTest::new(FlashReducer)
            .with_env(Duration::from_millis(600))
            .given_state(FlashState::default())
            .when_action(FlashAction::Flash(1))
            .then_state(|state| assert!(state.lit.contains(&1)))
            .then_effects(|effects| {
                let (after, action) = assertions::expect_single_delay(effects);
                assert_eq!(after, Duration::from_millis(600));
                assert_eq!(action, &FlashAction::Fade(1));
            })
            .run();
    }

    #[test]
    fn queued_actions_share_state_and_effects() {
        ReducerTest::new(FlashReducer)
            .with_env(Duration::from_millis(10))
            .given_state(FlashState::default())
            .when_actions([
                FlashAction::Flash(1),
                FlashAction::Flash(2),
                FlashAction::Fade(1),
                FlashAction::Fade(1),
            ])
            .then_state(|state| assert_eq!(state.lit.iter().copied().collect::<Vec<_>>(), [2]))
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 4);
                assert_eq!(assertions::delayed_actions(effects).len(), 2);
            })
            .run();
    }

    #[test]
    fn no_effects_accepts_only_none() {
        assertions::assert_no_effects::<FlashAction>(&[Effect::None]);
        assertions::assert_no_effects::<FlashAction>(&[]);
    }

    #[test]
    #[should_panic(expected = "Expected no effects")]
    fn no_effects_rejects_delay() {
        assertions::assert_no_effects(&[Effect::delay(
            Duration::from_millis(1),
            FlashAction::Fade(1),
        )]);
    }
}

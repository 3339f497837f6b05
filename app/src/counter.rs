//! Click-counter feature: state, actions, and reducer.
//!
//! The counter is a pure state machine: a deterministic, side-effect-free
//! mapping from `(count, action)` to a new count. All effects are
//! `Effect::None`, and there are no bounds; decrementing below zero is
//! permitted and preserved.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tasktally_core::{SmallVec, effect::Effect, environment::Clock, reducer::Reducer, smallvec};

/// Counter state
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterState {
    /// Current count value
    pub count: i64,
}

/// Counter actions
///
/// A closed vocabulary: every input the counter can receive is one of these
/// variants, and the reducer matches them exhaustively.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CounterAction {
    /// Increment the counter by 1
    Increment,
    /// Decrement the counter by 1
    Decrement,
    /// Reset the counter to 0
    Reset,
    /// Explicit identity: leave the count unchanged
    NoOp,
}

/// Counter environment
///
/// The clock is carried for interface uniformity with the other features
/// but never read; the counter is a pure state machine.
#[derive(Clone)]
pub struct CounterEnvironment {
    /// Clock for time-based operations (unused by the counter)
    pub clock: Arc<dyn Clock>,
}

impl CounterEnvironment {
    /// Creates a new counter environment with the given clock
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

/// Counter reducer
///
/// Deterministic: the same `(state, action)` pair always produces the same
/// result. Performs no I/O and returns no effects.
#[derive(Clone, Copy, Debug, Default)]
pub struct CounterReducer;

impl CounterReducer {
    /// Creates a new `CounterReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for CounterReducer {
    type State = CounterState;
    type Action = CounterAction;
    type Environment = CounterEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CounterAction::Increment => {
                state.count += 1;
            }
            CounterAction::Decrement => {
                state.count -= 1;
            }
            CounterAction::Reset => {
                state.count = 0;
            }
            CounterAction::NoOp => {}
        }

        smallvec![Effect::None]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasktally_testing::test_clock;

    fn create_test_env() -> CounterEnvironment {
        CounterEnvironment::new(Arc::new(test_clock()))
    }

    #[test]
    fn increment_adds_one() {
        let mut state = CounterState::default();
        let env = create_test_env();
        let reducer = CounterReducer::new();

        let effects = reducer.reduce(&mut state, CounterAction::Increment, &env);

        assert_eq!(state.count, 1);
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn decrement_subtracts_one() {
        let mut state = CounterState { count: 5 };
        let env = create_test_env();
        let reducer = CounterReducer::new();

        let effects = reducer.reduce(&mut state, CounterAction::Decrement, &env);

        assert_eq!(state.count, 4);
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn decrement_below_zero_is_preserved() {
        let mut state = CounterState::default();
        let env = create_test_env();
        let reducer = CounterReducer::new();

        reducer.reduce(&mut state, CounterAction::Decrement, &env);
        reducer.reduce(&mut state, CounterAction::Decrement, &env);

        assert_eq!(state.count, -2);
    }

    #[test]
    fn reset_returns_to_zero_from_any_count() {
        let env = create_test_env();
        let reducer = CounterReducer::new();

        for start in [-17, 0, 42, i64::MAX] {
            let mut state = CounterState { count: start };
            reducer.reduce(&mut state, CounterAction::Reset, &env);
            assert_eq!(state.count, 0);
        }
    }

    #[test]
    fn noop_is_identity() {
        let mut state = CounterState { count: 9 };
        let env = create_test_env();
        let reducer = CounterReducer::new();

        let effects = reducer.reduce(&mut state, CounterAction::NoOp, &env);

        assert_eq!(state, CounterState { count: 9 });
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn reducer_is_deterministic() {
        let env = create_test_env();
        let reducer = CounterReducer::new();

        let mut first = CounterState { count: 3 };
        let mut second = CounterState { count: 3 };
        reducer.reduce(&mut first, CounterAction::Increment, &env);
        reducer.reduce(&mut second, CounterAction::Increment, &env);

        assert_eq!(first, second);
    }

    #[test]
    fn multiple_operations() {
        let mut state = CounterState::default();
        let env = create_test_env();
        let reducer = CounterReducer::new();

        // Increment twice
        reducer.reduce(&mut state, CounterAction::Increment, &env);
        reducer.reduce(&mut state, CounterAction::Increment, &env);
        assert_eq!(state.count, 2);

        // Decrement once
        reducer.reduce(&mut state, CounterAction::Decrement, &env);
        assert_eq!(state.count, 1);

        // Reset
        reducer.reduce(&mut state, CounterAction::Reset, &env);
        assert_eq!(state.count, 0);
    }
}

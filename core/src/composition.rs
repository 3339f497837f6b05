//! Reducer composition utilities
//!
//! This module provides utilities for composing reducers in various ways:
//! - **`combine_reducers`**: Run multiple reducers on the same state/action
//! - **`scope_reducer`**: Embed a child reducer into a parent feature
//!
//! A parent feature is typically assembled from both: each child reducer is
//! scoped into the parent's state/action/environment types, and the scoped
//! results are combined into one reducer the store can run.

use crate::effect::Effect;
use crate::reducer::Reducer;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer is run in sequence, and all effects are collected and concatenated.
/// This is useful when you want to split reducer logic across multiple implementations.
///
/// # Type Parameters
///
/// - `S`: The state type
/// - `A`: The action type
/// - `E`: The environment type
///
/// # Examples
///
/// ```
/// use tasktally_core::{Effect, Reducer, SmallVec, smallvec};
/// use tasktally_core::composition::combine_reducers;
///
/// #[derive(Clone, Default)]
/// struct PanelState {
///     tally: i64,
///     label: String,
/// }
///
/// #[derive(Clone)]
/// enum PanelAction {
///     Bump,
///     Relabel(String),
/// }
///
/// struct TallyReducer;
/// struct LabelReducer;
///
/// impl Reducer for TallyReducer {
///     type State = PanelState;
///     type Action = PanelAction;
///     type Environment = ();
///
///     fn reduce(
///         &self,
///         state: &mut Self::State,
///         action: Self::Action,
///         _env: &Self::Environment,
///     ) -> SmallVec<[Effect<Self::Action>; 4]> {
///         if matches!(action, PanelAction::Bump) {
///             state.tally += 1;
///         }
///         smallvec![Effect::None]
///     }
/// }
///
/// impl Reducer for LabelReducer {
///     type State = PanelState;
///     type Action = PanelAction;
///     type Environment = ();
///
///     fn reduce(
///         &self,
///         state: &mut Self::State,
///         action: Self::Action,
///         _env: &Self::Environment,
///     ) -> SmallVec<[Effect<Self::Action>; 4]> {
///         if let PanelAction::Relabel(label) = action {
///             state.label = label;
///         }
///         smallvec![Effect::None]
///     }
/// }
///
/// let combined = combine_reducers(vec![Box::new(TallyReducer), Box::new(LabelReducer)]);
///
/// let mut state = PanelState::default();
/// let _ = combined.reduce(&mut state, PanelAction::Bump, &());
/// assert_eq!(state.tally, 1);
/// ```
#[must_use]
pub fn combine_reducers<S, A, E>(
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>>,
) -> CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>>,
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> smallvec::SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = smallvec::SmallVec::new();

        for reducer in &self.reducers {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects);
        }

        all_effects
    }
}

/// Embeds a child reducer into a parent feature.
///
/// The child runs against a lens into the parent state, sees only the parent
/// actions its prism extracts, and receives its own slice of the parent
/// environment. Effects the child produces are lifted back into the parent
/// action type via `embed_action`, so the runtime can feed them through the
/// parent reducer.
///
/// # Type Parameters
///
/// - `S` / `CS`: Parent and child state types
/// - `A` / `CA`: Parent and child action types
/// - `E` / `CE`: Parent and child environment types
///
/// # Examples
///
/// ```
/// use tasktally_core::{Effect, Reducer, SmallVec, smallvec};
/// use tasktally_core::composition::scope_reducer;
///
/// #[derive(Clone, Default)]
/// struct TallyState {
///     count: i64,
/// }
///
/// #[derive(Clone)]
/// enum TallyAction {
///     Increment,
///     Decrement,
/// }
///
/// struct TallyReducer;
///
/// impl Reducer for TallyReducer {
///     type State = TallyState;
///     type Action = TallyAction;
///     type Environment = ();
///
///     fn reduce(
///         &self,
///         state: &mut Self::State,
///         action: Self::Action,
///         _env: &Self::Environment,
///     ) -> SmallVec<[Effect<Self::Action>; 4]> {
///         match action {
///             TallyAction::Increment => state.count += 1,
///             TallyAction::Decrement => state.count -= 1,
///         }
///         smallvec![Effect::None]
///     }
/// }
///
/// // Parent feature
/// #[derive(Clone, Default)]
/// struct AppState {
///     tally: TallyState,
///     title: String,
/// }
///
/// #[derive(Clone)]
/// enum AppAction {
///     Tally(TallyAction),
///     TitleChanged(String),
/// }
///
/// let scoped = scope_reducer(
///     TallyReducer,
///     |app: &AppState| &app.tally,
///     |app: &mut AppState, tally: TallyState| app.tally = tally,
///     |action: AppAction| match action {
///         AppAction::Tally(tally) => Some(tally),
///         AppAction::TitleChanged(_) => None,
///     },
///     AppAction::Tally,
///     |env: &()| env,
/// );
///
/// let mut state = AppState::default();
/// let _ = scoped.reduce(&mut state, AppAction::Tally(TallyAction::Increment), &());
/// assert_eq!(state.tally.count, 1);
///
/// // Actions the prism rejects leave the child untouched
/// let _ = scoped.reduce(&mut state, AppAction::TitleChanged("tally".into()), &());
/// assert_eq!(state.tally.count, 1);
/// ```
#[must_use]
pub fn scope_reducer<S, CS, A, CA, E, CE, R>(
    reducer: R,
    get_state: fn(&S) -> &CS,
    set_state: fn(&mut S, CS),
    extract_action: fn(A) -> Option<CA>,
    embed_action: fn(CA) -> A,
    get_environment: fn(&E) -> &CE,
) -> ScopedReducer<S, CS, A, CA, E, CE, R>
where
    S: 'static,
    CS: Clone + 'static,
    A: Send + 'static,
    CA: Send + 'static,
    E: 'static,
    CE: 'static,
    R: Reducer<State = CS, Action = CA, Environment = CE>,
{
    ScopedReducer {
        reducer,
        get_state,
        set_state,
        extract_action,
        embed_action,
        get_environment,
    }
}

/// A child reducer embedded into a parent feature.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, CS, A, CA, E, CE, R>
where
    S: 'static,
    CS: Clone + 'static,
    A: Send + 'static,
    CA: Send + 'static,
    E: 'static,
    CE: 'static,
    R: Reducer<State = CS, Action = CA, Environment = CE>,
{
    reducer: R,
    get_state: fn(&S) -> &CS,
    set_state: fn(&mut S, CS),
    extract_action: fn(A) -> Option<CA>,
    embed_action: fn(CA) -> A,
    get_environment: fn(&E) -> &CE,
}

impl<S, CS, A, CA, E, CE, R> Reducer for ScopedReducer<S, CS, A, CA, E, CE, R>
where
    S: 'static,
    CS: Clone + 'static,
    A: Send + 'static,
    CA: Send + 'static,
    E: 'static,
    CE: 'static,
    R: Reducer<State = CS, Action = CA, Environment = CE>,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> smallvec::SmallVec<[Effect<Self::Action>; 4]> {
        // Actions outside the child's vocabulary are not ours to handle
        let Some(child_action) = (self.extract_action)(action) else {
            return smallvec::smallvec![Effect::None];
        };

        // Run the child against a copy of its slice, then write back
        let mut child_state = (self.get_state)(state).clone();
        let child_env = (self.get_environment)(env);
        let effects = self.reducer.reduce(&mut child_state, child_action, child_env);
        (self.set_state)(state, child_state);

        // Lift child effects into the parent action type
        let embed = self.embed_action;
        effects.into_iter().map(|effect| effect.map(embed)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SmallVec, smallvec};
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct PanelState {
        tally: i64,
        label: String,
    }

    #[derive(Clone)]
    enum PanelAction {
        Bump,
        Relabel(String),
    }

    struct TallyReducer;

    impl Reducer for TallyReducer {
        type State = PanelState;
        type Action = PanelAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            if matches!(action, PanelAction::Bump) {
                state.tally += 1;
            }
            smallvec![Effect::None]
        }
    }

    struct LabelReducer;

    impl Reducer for LabelReducer {
        type State = PanelState;
        type Action = PanelAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            if let PanelAction::Relabel(label) = action {
                state.label = label;
            }
            smallvec![Effect::None]
        }
    }

    #[test]
    fn combined_reducers_each_see_every_action() {
        let combined = combine_reducers(vec![Box::new(TallyReducer), Box::new(LabelReducer)]);

        let mut state = PanelState::default();

        let _ = combined.reduce(&mut state, PanelAction::Bump, &());
        assert_eq!(state.tally, 1);

        let _ = combined.reduce(&mut state, PanelAction::Relabel("clicks".to_string()), &());
        assert_eq!(state.label, "clicks");

        // Earlier changes survive later actions
        let _ = combined.reduce(&mut state, PanelAction::Bump, &());
        assert_eq!(state.tally, 2);
        assert_eq!(state.label, "clicks");
    }

    #[test]
    fn combined_reducer_concatenates_effects() {
        let combined = combine_reducers(vec![Box::new(TallyReducer), Box::new(LabelReducer)]);

        let mut state = PanelState::default();
        let effects = combined.reduce(&mut state, PanelAction::Bump, &());

        assert_eq!(effects.len(), 2);
    }

    // Scoped reducer tests

    #[derive(Clone, Default)]
    struct ChildState {
        value: i64,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum ChildAction {
        Add(i64),
        ScheduleAdd(i64),
    }

    struct ChildReducer;

    impl Reducer for ChildReducer {
        type State = ChildState;
        type Action = ChildAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                ChildAction::Add(n) => {
                    state.value += n;
                    smallvec![Effect::None]
                },
                ChildAction::ScheduleAdd(n) => smallvec![Effect::Delay {
                    duration: Duration::from_millis(5),
                    action: Box::new(ChildAction::Add(n)),
                }],
            }
        }
    }

    #[derive(Clone, Default)]
    struct ParentState {
        child: ChildState,
        note: String,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum ParentAction {
        Child(ChildAction),
        Note(String),
    }

    fn scoped_child() -> impl Reducer<State = ParentState, Action = ParentAction, Environment = ()>
    {
        scope_reducer(
            ChildReducer,
            |parent: &ParentState| &parent.child,
            |parent: &mut ParentState, child: ChildState| parent.child = child,
            |action: ParentAction| match action {
                ParentAction::Child(child) => Some(child),
                ParentAction::Note(_) => None,
            },
            ParentAction::Child,
            |env: &()| env,
        )
    }

    #[test]
    fn scoped_reducer_routes_matching_actions() {
        let scoped = scoped_child();

        let mut state = ParentState::default();
        let _ = scoped.reduce(&mut state, ParentAction::Child(ChildAction::Add(3)), &());

        assert_eq!(state.child.value, 3);
        assert!(state.note.is_empty());
    }

    #[test]
    fn scoped_reducer_ignores_unrelated_actions() {
        let scoped = scoped_child();

        let mut state = ParentState {
            child: ChildState { value: 7 },
            note: String::new(),
        };
        let effects = scoped.reduce(&mut state, ParentAction::Note("untouched".to_string()), &());

        assert_eq!(state.child.value, 7);
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], Effect::None));
    }

    #[test]
    #[allow(clippy::panic)]
    fn scoped_reducer_lifts_child_effects_into_parent_actions() {
        let scoped = scoped_child();

        let mut state = ParentState::default();
        let effects = scoped.reduce(
            &mut state,
            ParentAction::Child(ChildAction::ScheduleAdd(2)),
            &(),
        );

        assert_eq!(effects.len(), 1);
        match &effects[0] {
            Effect::Delay { action, .. } => {
                assert_eq!(**action, ParentAction::Child(ChildAction::Add(2)));
            },
            other => panic!("expected Delay, got {other:?}"),
        }
    }
}

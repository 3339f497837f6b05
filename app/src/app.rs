//! Application feature: the composed component state and reducer.
//!
//! The component owns an input field, the todo list, and the click counter.
//! Its reducer is assembled from three parts: a form reducer handling the
//! field and submissions, and the two child reducers scoped into the
//! application's state and action types.

use crate::counter::{CounterAction, CounterEnvironment, CounterReducer, CounterState};
use crate::todos::{TodoEnvironment, TodoListAction, TodoListReducer, TodoListState};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tasktally_core::{
    SmallVec,
    composition::{CombinedReducer, combine_reducers, scope_reducer},
    effect::Effect,
    environment::{Clock, IdGenerator},
    reducer::Reducer,
    smallvec,
};

/// State of the whole component
///
/// Both containers are exclusively owned here; nothing else reads or
/// mutates them. Created empty at mount, discarded at unmount.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    /// Current text-field value
    pub input: String,
    /// The todo list
    pub todos: TodoListState,
    /// The click counter
    pub counter: CounterState,
}

/// Every input the component can receive
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppAction {
    /// The field's value changed (typing)
    InputChanged(String),
    /// The entry form was submitted
    FormSubmitted,
    /// A todo-list mutation
    Todos(TodoListAction),
    /// A counter action
    Counter(CounterAction),
}

/// Environment dependencies for the whole component
#[derive(Clone)]
pub struct AppEnvironment {
    /// Dependencies of the todo-list feature
    pub todos: TodoEnvironment,
    /// Dependencies of the counter feature
    pub counter: CounterEnvironment,
}

impl AppEnvironment {
    /// Creates a new `AppEnvironment` sharing one clock across features
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            todos: TodoEnvironment::new(Arc::clone(&clock), ids),
            counter: CounterEnvironment::new(clock),
        }
    }
}

/// Reducer for the entry form
///
/// Handles typing into the field and form submission. Submission clears the
/// field and appends the captured text in the same reduce call, so the pair
/// is observable as a single state transition. Empty input still flows
/// through the list's append so its guard records the refusal; the field
/// keeps its (empty) value.
#[derive(Clone, Copy, Debug, Default)]
pub struct EntryFormReducer;

impl EntryFormReducer {
    /// Creates a new `EntryFormReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for EntryFormReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AppAction::InputChanged(value) => {
                state.input = value;
                smallvec![Effect::None]
            }

            AppAction::FormSubmitted => {
                let text = std::mem::take(&mut state.input);
                let effects = TodoListReducer::new().reduce(
                    &mut state.todos,
                    TodoListAction::Append { text },
                    &env.todos,
                );
                effects
                    .into_iter()
                    .map(|effect| effect.map(AppAction::Todos))
                    .collect()
            }

            // Child actions are handled by the scoped reducers
            AppAction::Todos(_) | AppAction::Counter(_) => smallvec![Effect::None],
        }
    }
}

/// Builds the component's composed reducer
///
/// The form reducer sees every action; the child reducers see only the
/// actions their prisms extract, against their own slice of state and
/// environment.
#[must_use]
pub fn app_reducer() -> CombinedReducer<AppState, AppAction, AppEnvironment> {
    combine_reducers(vec![
        Box::new(EntryFormReducer::new()),
        Box::new(scope_reducer(
            TodoListReducer::new(),
            |app: &AppState| &app.todos,
            |app: &mut AppState, todos: TodoListState| app.todos = todos,
            |action: AppAction| match action {
                AppAction::Todos(action) => Some(action),
                _ => None,
            },
            AppAction::Todos,
            |env: &AppEnvironment| &env.todos,
        )),
        Box::new(scope_reducer(
            CounterReducer::new(),
            |app: &AppState| &app.counter,
            |app: &mut AppState, counter: CounterState| app.counter = counter,
            |action: AppAction| match action {
                AppAction::Counter(action) => Some(action),
                _ => None,
            },
            AppAction::Counter,
            |env: &AppEnvironment| &env.counter,
        )),
    ])
}

//! Todo-list feature: state, actions, and reducer.
//!
//! The list is an ordered sequence of items. Position (index) is the sole
//! identity used by mutations: toggling and removing address items by their
//! current ordinal, and removing index `i` shifts every later item left by
//! one. Each item also carries a stable synthetic id, but that id is a render
//! key and diagnostic only, never an operation key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tasktally_core::{
    SmallVec, effect::Effect, environment::Clock, environment::IdGenerator, reducer::Reducer,
    smallvec,
};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a todo item
///
/// Minted by the environment's [`IdGenerator`] when an item is appended.
/// Serves as the stable row key in the rendered tree; all mutations remain
/// positional.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Creates a new random `TodoId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `TodoId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Stable render key, minted at creation
    pub id: TodoId,
    /// Display text, set at creation and immutable thereafter
    pub text: String,
    /// Completion flag, toggled in place
    pub complete: bool,
    /// When the item was appended
    pub created_at: DateTime<Utc>,
}

impl TodoItem {
    /// Creates a new incomplete todo item
    #[must_use]
    pub const fn new(id: TodoId, text: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            complete: false,
            created_at,
        }
    }

    /// Flips the completion flag in place
    ///
    /// Text, id, and creation time are untouched, so toggling twice
    /// restores the item exactly.
    pub fn toggle(&mut self) {
        self.complete = !self.complete;
    }
}

/// Errors raised by refused list mutations
///
/// Refusals are recorded in [`TodoListState::last_error`] for diagnostics;
/// they are never projected into the rendered tree.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum TodoError {
    /// The position does not identify an existing item
    #[error("index {index} is out of range for a list of {len} items")]
    IndexOutOfRange {
        /// The refused position
        index: usize,
        /// List length at the time of the refusal
        len: usize,
    },

    /// An empty string was submitted for appending
    #[error("submitted text is empty")]
    EmptySubmission,
}

/// State of the todo list
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoListState {
    /// All items in insertion order
    pub items: Vec<TodoItem>,
    /// Most recent refused mutation, cleared by the next successful one
    pub last_error: Option<TodoError>,
}

impl TodoListState {
    /// Creates a new empty list
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            last_error: None,
        }
    }

    /// Returns the number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when the list holds no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the item at the given position
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TodoItem> {
        self.items.get(index)
    }

    /// Returns the number of completed items
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.complete).count()
    }
}

/// Actions mutating the todo list
///
/// `Toggle` and `Remove` carry the item's current ordinal position. Positions
/// are unstable across removals: after removing index `i`, every later item
/// answers to its old position minus one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoListAction {
    /// Append a new incomplete item to the end of the list
    Append {
        /// Display text for the new item
        text: String,
    },

    /// Flip the completion flag of the item at `index`
    Toggle {
        /// Current position of the item
        index: usize,
    },

    /// Remove the item at `index`, shifting later items left
    Remove {
        /// Current position of the item
        index: usize,
    },
}

/// Environment dependencies for the todo-list reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock for creation timestamps
    pub clock: Arc<dyn Clock>,
    /// Generator minting item ids
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }
}

/// Reducer for the todo list
///
/// All three operations are total and synchronous: invalid positions and
/// empty submissions are refused by recording the error and leaving the
/// items untouched, never by panicking. No operation produces effects.
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoListReducer;

impl TodoListReducer {
    /// Creates a new `TodoListReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for TodoListReducer {
    type State = TodoListState;
    type Action = TodoListAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TodoListAction::Append { text } => {
                // The host's "required" constraint is not assumed here; an
                // empty submission that slips through is refused.
                if text.is_empty() {
                    state.last_error = Some(TodoError::EmptySubmission);
                    return smallvec![Effect::None];
                }

                let item = TodoItem::new(
                    TodoId::from_uuid(env.ids.generate()),
                    text,
                    env.clock.now(),
                );
                state.items.push(item);
                state.last_error = None;
            }

            TodoListAction::Toggle { index } => {
                let len = state.items.len();
                if let Some(item) = state.items.get_mut(index) {
                    item.toggle();
                    state.last_error = None;
                } else {
                    state.last_error = Some(TodoError::IndexOutOfRange { index, len });
                }
            }

            TodoListAction::Remove { index } => {
                let len = state.items.len();
                if index < len {
                    state.items.remove(index);
                    state.last_error = None;
                } else {
                    state.last_error = Some(TodoError::IndexOutOfRange { index, len });
                }
            }
        }

        smallvec![Effect::None]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasktally_testing::{ReducerTest, SequentialIdGenerator, assertions, test_clock};

    fn create_test_env() -> TodoEnvironment {
        TodoEnvironment::new(
            Arc::new(test_clock()),
            Arc::new(SequentialIdGenerator::new()),
        )
    }

    fn seeded(texts: &[&str]) -> TodoListState {
        let mut state = TodoListState::new();
        for text in texts {
            state.items.push(TodoItem::new(
                TodoId::new(),
                (*text).to_string(),
                test_clock().now(),
            ));
        }
        state
    }

    #[test]
    fn append_pushes_incomplete_item_to_the_end() {
        ReducerTest::new(TodoListReducer::new())
            .with_env(create_test_env())
            .given_state(seeded(&["first"]))
            .when_action(TodoListAction::Append {
                text: "second".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.len(), 2);
                assert_eq!(state.items[0].text, "first");
                let appended = &state.items[1];
                assert_eq!(appended.text, "second");
                assert!(!appended.complete);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn append_mints_id_and_timestamp_from_the_environment() {
        ReducerTest::new(TodoListReducer::new())
            .with_env(create_test_env())
            .given_state(TodoListState::new())
            .when_action(TodoListAction::Append {
                text: "buy milk".to_string(),
            })
            .then_state(|state| {
                let item = &state.items[0];
                assert_eq!(item.id.as_uuid().as_u128(), 1);
                assert_eq!(item.created_at, test_clock().now());
            })
            .run();
    }

    #[test]
    fn append_empty_text_is_refused() {
        ReducerTest::new(TodoListReducer::new())
            .with_env(create_test_env())
            .given_state(seeded(&["kept"]))
            .when_action(TodoListAction::Append {
                text: String::new(),
            })
            .then_state(|state| {
                assert_eq!(state.len(), 1);
                assert_eq!(state.items[0].text, "kept");
                assert_eq!(state.last_error, Some(TodoError::EmptySubmission));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn append_whitespace_text_is_accepted() {
        // Only the exactly-empty string is refused, matching the host
        // form's required-field behavior.
        ReducerTest::new(TodoListReducer::new())
            .with_env(create_test_env())
            .given_state(TodoListState::new())
            .when_action(TodoListAction::Append {
                text: "   ".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.len(), 1);
                assert_eq!(state.items[0].text, "   ");
                assert_eq!(state.last_error, None);
            })
            .run();
    }

    #[test]
    fn append_clears_a_previous_error() {
        let mut state = seeded(&["kept"]);
        state.last_error = Some(TodoError::EmptySubmission);

        ReducerTest::new(TodoListReducer::new())
            .with_env(create_test_env())
            .given_state(state)
            .when_action(TodoListAction::Append {
                text: "next".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.len(), 2);
                assert_eq!(state.last_error, None);
            })
            .run();
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn toggle_flips_only_the_addressed_item() {
        ReducerTest::new(TodoListReducer::new())
            .with_env(create_test_env())
            .given_state(seeded(&["first", "second", "third"]))
            .when_action(TodoListAction::Toggle { index: 1 })
            .then_state(|state| {
                assert!(!state.items[0].complete);
                assert!(!state.items[2].complete);
                let toggled = state.get(1).unwrap();
                assert!(toggled.complete);
                assert_eq!(toggled.text, "second");
                assert_eq!(state.completed_count(), 1);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn toggle_twice_restores_the_original_item() {
        let state = seeded(&["cycle"]);
        let original = state.items[0].clone();
        let env = create_test_env();
        let reducer = TodoListReducer::new();

        let mut state = state;
        let _ = reducer.reduce(&mut state, TodoListAction::Toggle { index: 0 }, &env);
        assert!(state.items[0].complete);
        assert_eq!(state.completed_count(), 1);

        let _ = reducer.reduce(&mut state, TodoListAction::Toggle { index: 0 }, &env);
        assert_eq!(state.items[0], original);
        assert_eq!(state.completed_count(), 0);
    }

    #[test]
    fn toggle_out_of_range_is_refused() {
        ReducerTest::new(TodoListReducer::new())
            .with_env(create_test_env())
            .given_state(seeded(&["only"]))
            .when_action(TodoListAction::Toggle { index: 5 })
            .then_state(|state| {
                assert!(!state.items[0].complete);
                assert!(state.get(5).is_none());
                assert_eq!(
                    state.last_error,
                    Some(TodoError::IndexOutOfRange { index: 5, len: 1 })
                );
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn remove_shifts_later_items_left() {
        ReducerTest::new(TodoListReducer::new())
            .with_env(create_test_env())
            .given_state(seeded(&["first", "second", "third"]))
            .when_action(TodoListAction::Remove { index: 1 })
            .then_state(|state| {
                assert_eq!(state.len(), 2);
                assert_eq!(state.items[0].text, "first");
                assert_eq!(state.items[1].text, "third");
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn remove_out_of_range_is_refused() {
        ReducerTest::new(TodoListReducer::new())
            .with_env(create_test_env())
            .given_state(seeded(&["first", "second"]))
            .when_action(TodoListAction::Remove { index: 2 })
            .then_state(|state| {
                assert_eq!(state.len(), 2);
                assert_eq!(
                    state.last_error,
                    Some(TodoError::IndexOutOfRange { index: 2, len: 2 })
                );
            })
            .run();
    }

    #[test]
    fn remove_on_an_empty_list_is_refused() {
        ReducerTest::new(TodoListReducer::new())
            .with_env(create_test_env())
            .given_state(TodoListState::new())
            .when_action(TodoListAction::Remove { index: 0 })
            .then_state(|state| {
                assert!(state.is_empty());
                assert_eq!(
                    state.last_error,
                    Some(TodoError::IndexOutOfRange { index: 0, len: 0 })
                );
            })
            .run();
    }

    #[test]
    fn todo_id_display() {
        let id = TodoId::new();
        let display = format!("{id}");
        assert!(!display.is_empty());
    }

    #[test]
    fn todo_error_messages() {
        let error = TodoError::IndexOutOfRange { index: 3, len: 1 };
        assert_eq!(
            error.to_string(),
            "index 3 is out of range for a list of 1 items"
        );
        assert_eq!(TodoError::EmptySubmission.to_string(), "submitted text is empty");
    }
}

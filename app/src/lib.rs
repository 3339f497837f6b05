//! # TaskTally
//!
//! A client-side to-do list and click-counter component built on the
//! TaskTally architecture. It demonstrates:
//!
//! - Two independent state containers (todo list, counter) composed into
//!   one component via reducer scoping
//! - Positional list mutations with defensive out-of-range refusal
//! - Atomic form submission (clear field + append item in one transition)
//! - A pure view projection where every control carries its action
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tasktally_app::view::render;
//! use tasktally_app::{AppAction, AppEnvironment, AppState, app_reducer};
//! use tasktally_core::environment::{RandomIdGenerator, SystemClock};
//! use tasktally_runtime::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create environment and store
//! let env = AppEnvironment::new(Arc::new(SystemClock), Arc::new(RandomIdGenerator));
//! let store = Store::new(AppState::default(), app_reducer(), env);
//!
//! // Type into the field and submit
//! store
//!     .send(AppAction::InputChanged("buy milk".to_string()))
//!     .await?;
//! store.send(AppAction::FormSubmitted).await?;
//!
//! // Render the current state
//! let document = store.state(|state| render(state)).await;
//! println!("{document}");
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod counter;
pub mod todos;
pub mod view;

// Re-export commonly used types
pub use app::{AppAction, AppEnvironment, AppState, EntryFormReducer, app_reducer};
pub use counter::{CounterAction, CounterEnvironment, CounterReducer, CounterState};
pub use todos::{
    TodoEnvironment, TodoError, TodoId, TodoItem, TodoListAction, TodoListReducer, TodoListState,
};
pub use view::{Document, render};

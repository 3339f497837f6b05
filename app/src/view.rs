//! Pure projection of component state into a display-element tree.
//!
//! [`render`] recomputes the whole tree from the current [`AppState`] on
//! every call; there is no diffing and no retained widget state. Every
//! interactive element carries the [`AppAction`] its gesture dispatches,
//! which is how gestures are wired to mutations: the host reads the action
//! off the control and sends it to the store.

use crate::app::{AppAction, AppState};
use crate::counter::CounterAction;
use crate::todos::{TodoId, TodoListAction};
use serde::{Deserialize, Serialize};

/// An interactive element: a label and the action its gesture dispatches
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    /// Text shown on the control
    pub label: String,
    /// Action dispatched when the control is activated
    pub action: AppAction,
}

/// Display text with optional strikethrough
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledText {
    /// The text itself
    pub content: String,
    /// Whether the text is struck through
    pub struck: bool,
}

/// The text input and submit control at the top of the component
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextInput {
    /// Current field value
    pub value: String,
    /// Whether the host form treats the field as required
    pub required: bool,
}

/// The entry form: input field plus submit control
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryForm {
    /// The text field carrying the current input value
    pub input: TextInput,
    /// Submit control dispatching the submission gesture
    pub submit: Control,
}

/// One row of the todo list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRow {
    /// Stable row key (the item's id, not its position)
    pub key: TodoId,
    /// The item text, struck through when complete
    pub label: StyledText,
    /// Completion toggle; its action carries the item's current position
    pub toggle: Control,
    /// Removal control; its action carries the item's current position
    pub remove: Control,
}

/// The click-counter panel
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterPanel {
    /// Current count readout
    pub readout: String,
    /// Increment control
    pub increment: Control,
    /// Decrement control
    pub decrement: Control,
    /// Reset control
    pub reset: Control,
}

/// The whole rendered tree
///
/// Serde-serializable so hosts can snapshot it; the [`std::fmt::Display`]
/// impl is the plain-text projection the demo binary prints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Component heading
    pub heading: String,
    /// The entry form
    pub form: EntryForm,
    /// One row per todo item, in list order
    pub rows: Vec<TodoRow>,
    /// The counter panel
    pub counter: CounterPanel,
}

/// Projects the component state into a display tree
///
/// Pure: the same state always renders the same document, so re-renders may
/// be coalesced or repeated freely.
#[must_use]
pub fn render(state: &AppState) -> Document {
    Document {
        heading: "Todo List".to_string(),
        form: EntryForm {
            input: TextInput {
                value: state.input.clone(),
                required: true,
            },
            submit: Control {
                label: "Add Todo".to_string(),
                action: AppAction::FormSubmitted,
            },
        },
        rows: state
            .todos
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| TodoRow {
                key: item.id.clone(),
                label: StyledText {
                    content: item.text.clone(),
                    struck: item.complete,
                },
                toggle: Control {
                    label: if item.complete {
                        "Incomplete".to_string()
                    } else {
                        "Complete".to_string()
                    },
                    action: AppAction::Todos(TodoListAction::Toggle { index }),
                },
                remove: Control {
                    label: "x".to_string(),
                    action: AppAction::Todos(TodoListAction::Remove { index }),
                },
            })
            .collect(),
        counter: CounterPanel {
            readout: format!("Clicked Count = {}", state.counter.count),
            increment: Control {
                label: "+".to_string(),
                action: AppAction::Counter(CounterAction::Increment),
            },
            decrement: Control {
                label: "-".to_string(),
                action: AppAction::Counter(CounterAction::Decrement),
            },
            reset: Control {
                label: "Reset".to_string(),
                action: AppAction::Counter(CounterAction::Reset),
            },
        },
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== {} ===", self.heading)?;
        writeln!(
            f,
            "input: {:?}  [{}]",
            self.form.input.value, self.form.submit.label
        )?;
        if self.rows.is_empty() {
            writeln!(f, "  (no items)")?;
        }
        for row in &self.rows {
            let marker = if row.label.struck { "✓" } else { " " };
            writeln!(
                f,
                "  [{marker}] {}  ({} | {})",
                row.label.content, row.toggle.label, row.remove.label
            )?;
        }
        write!(
            f,
            "{}  [{}] [{}] [{}]",
            self.counter.readout,
            self.counter.increment.label,
            self.counter.decrement.label,
            self.counter.reset.label
        )
    }
}

//! Typed tasks and the task-list projection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::enums::TaskType;

/// One selectable text inside a task (a side, an item, or a statement).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskOption {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub text: String,
}

impl TaskOption {
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Two options, the participant picks one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PairedComparisonTask {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub left: TaskOption,
    #[serde(default)]
    pub right: TaskOption,
}

/// Best/worst pick among several items.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MaxDiffTask {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub items: Vec<TaskOption>,
}

/// Pick `pick` statements out of a list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ForcedChoiceTask {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub statements: Vec<TaskOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pick: Option<u32>,
}

/// A task of a known type, tagged by `type`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Task {
    #[serde(rename = "paired_comparison")]
    PairedComparison(PairedComparisonTask),
    #[serde(rename = "maxdiff")]
    MaxDiff(MaxDiffTask),
    #[serde(rename = "forced_choice")]
    ForcedChoice(ForcedChoiceTask),
}

impl Task {
    #[must_use]
    pub const fn task_type(&self) -> TaskType {
        match self {
            Self::PairedComparison(_) => TaskType::PairedComparison,
            Self::MaxDiff(_) => TaskType::MaxDiff,
            Self::ForcedChoice(_) => TaskType::ForcedChoice,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::PairedComparison(task) => &task.id,
            Self::MaxDiff(task) => &task.id,
            Self::ForcedChoice(task) => &task.id,
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        match self {
            Self::PairedComparison(task) => &task.prompt,
            Self::MaxDiff(task) => &task.prompt,
            Self::ForcedChoice(task) => &task.prompt,
        }
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// A task whose `type` is unknown or whose fields do not fit the typed variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedTask {
    pub id: Option<String>,
    pub task_type: Option<String>,
    pub raw: Value,
}

/// Projection of one element of `blocks[0].tasks`.
///
/// Every element projects to exactly one entry, so indices line up with the
/// underlying JSON array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEntry {
    Known(Task),
    Unrecognized(UnrecognizedTask),
}

impl TaskEntry {
    /// Project a raw task value. Never fails: anything that does not parse as a
    /// known task becomes [`TaskEntry::Unrecognized`].
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match Task::deserialize(value) {
            Ok(task) => Self::Known(task),
            Err(error) => {
                tracing::trace!(%error, "task does not match a known shape");
                Self::Unrecognized(UnrecognizedTask {
                    id: value.get("id").and_then(Value::as_str).map(str::to_string),
                    task_type: value
                        .get("type")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    raw: value.clone(),
                })
            }
        }
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Known(task) => Some(task.id()),
            Self::Unrecognized(task) => task.id.as_deref(),
        }
    }

    /// The `type` string as written in the document.
    #[must_use]
    pub fn type_label(&self) -> Option<&str> {
        match self {
            Self::Known(task) => Some(task.task_type().as_str()),
            Self::Unrecognized(task) => task.task_type.as_deref(),
        }
    }

    /// The id, or `task_{n}` (1-based) when the task has none.
    /// The declared type, when it names one the console knows.
    #[must_use]
    pub fn task_type(&self) -> Option<TaskType> {
        self.type_label()?.parse().ok()
    }

    #[must_use]
    pub fn display_id(&self, index: usize) -> String {
        match self.id() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => format!("task_{}", index + 1),
        }
    }

    #[must_use]
    pub fn prompt(&self) -> Option<&str> {
        match self {
            Self::Known(task) => Some(task.prompt()),
            Self::Unrecognized(task) => task.raw.get("prompt").and_then(Value::as_str),
        }
    }

    #[must_use]
    pub const fn as_paired(&self) -> Option<&PairedComparisonTask> {
        match self {
            Self::Known(Task::PairedComparison(task)) => Some(task),
            _ => None,
        }
    }
}

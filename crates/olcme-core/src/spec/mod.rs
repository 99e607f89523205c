//! Instrument spec documents.
//!
//! A spec is the versioned JSON document `{ version, blocks: [Block] }` stored
//! on each instrument. The console only reads and writes `blocks[0]`.
//!
//! - [`task`]: typed task variants and the [`TaskEntry`] projection that keeps
//!   unrecognized shapes around as raw JSON.
//! - [`document`]: [`SpecDocument`], the raw document with immutable edit
//!   operations.
//! - [`validate`]: boundary checks run on load and before save.
//! - [`templates`]: the built-in instrument templates.

pub mod document;
pub mod task;
pub mod templates;
pub mod validate;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use document::{PairedTaskPatch, SpecDocument};
pub use task::{
    ForcedChoiceTask, MaxDiffTask, PairedComparisonTask, Task, TaskEntry, TaskOption,
    UnrecognizedTask,
};
pub use validate::{Severity, SpecIssue, has_errors, validate};

/// Spec format version written by the built-in templates.
pub const SPEC_VERSION: &str = "0.1";

/// Typed form of a spec, used to build templates.
///
/// Loaded documents are never forced through this type; see [`SpecDocument`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct InstrumentSpec {
    pub version: String,
    pub blocks: Vec<Block>,
}

/// A titled group of tasks.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Block {
    pub id: String,
    pub title: String,
    pub tasks: Vec<Task>,
}

impl InstrumentSpec {
    /// Serialize into the raw JSON stored on an instrument.
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Wrap into an editable document.
    #[must_use]
    pub fn to_document(&self) -> SpecDocument {
        SpecDocument::new(self.to_value())
    }
}

impl Block {
    /// Block inserted when an edit finds no `blocks[0]`.
    #[must_use]
    pub fn default_main() -> Self {
        Self {
            id: "main".into(),
            title: "Main".into(),
            tasks: Vec::new(),
        }
    }
}

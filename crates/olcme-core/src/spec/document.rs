//! The raw spec document and its immutable edit operations.
//!
//! The document is held as a `serde_json::Value` so fields the console does
//! not model survive a load/edit/save cycle untouched. Every edit clones the
//! current value, applies one change and returns the new document.

use serde_json::{Map, Value, json};

use super::Block;
use super::task::TaskEntry;
use super::templates;
use crate::errors::SpecEditError;

/// A parsed spec document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecDocument {
    value: Value,
}

impl SpecDocument {
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self { value }
    }

    /// Best-effort parse of an edit buffer. Returns `None` for invalid JSON.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        match serde_json::from_str(text) {
            Ok(value) => Some(Self { value }),
            Err(error) => {
                tracing::debug!(%error, "spec buffer is not valid JSON");
                None
            }
        }
    }

    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.value
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Two-space indented JSON, the format of the edit buffer.
    #[must_use]
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.value).unwrap_or_else(|_| "null".to_string())
    }

    /// Elements of `blocks[0].tasks`, empty when the path is absent or malformed.
    #[must_use]
    pub fn task_values(&self) -> &[Value] {
        self.value
            .get("blocks")
            .and_then(|blocks| blocks.get(0))
            .and_then(|block| block.get("tasks"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Typed projection of `blocks[0].tasks`, one entry per element.
    #[must_use]
    pub fn tasks(&self) -> Vec<TaskEntry> {
        self.task_values().iter().map(TaskEntry::from_value).collect()
    }

    #[must_use]
    pub fn task_count(&self) -> usize {
        self.task_values().len()
    }

    #[must_use]
    pub fn task(&self, index: usize) -> Option<TaskEntry> {
        self.task_values().get(index).map(TaskEntry::from_value)
    }

    /// New document where task `index` is the shallow merge of its previous
    /// fields with `partial`. Keys in `partial` replace existing keys.
    ///
    /// # Errors
    ///
    /// Returns [`SpecEditError::Malformed`] when `blocks[0].tasks` cannot be
    /// created, or [`SpecEditError::TaskIndexOutOfRange`] for a missing index.
    pub fn with_task_merged(
        &self,
        index: usize,
        partial: &Map<String, Value>,
    ) -> Result<Self, SpecEditError> {
        let mut next = self.value.clone();
        let tasks = ensure_first_block_tasks(&mut next)?;
        let len = tasks.len();
        let slot = tasks
            .get_mut(index)
            .ok_or(SpecEditError::TaskIndexOutOfRange { index, len })?;

        let mut merged = slot.as_object().cloned().unwrap_or_default();
        for (key, value) in partial {
            merged.insert(key.clone(), value.clone());
        }
        *slot = Value::Object(merged);
        Ok(Self { value: next })
    }

    /// Apply a paired-comparison form edit to task `index`.
    ///
    /// # Errors
    ///
    /// Same as [`SpecDocument::with_task_merged`].
    pub fn with_paired_patch(
        &self,
        index: usize,
        patch: &PairedTaskPatch,
    ) -> Result<Self, SpecEditError> {
        let current = self.task_values().get(index).cloned().unwrap_or(Value::Null);
        self.with_task_merged(index, &patch.to_partial(&current))
    }

    /// New document with a default paired task appended. Returns the document
    /// and the index of the new task.
    ///
    /// # Errors
    ///
    /// Returns [`SpecEditError::Malformed`] when `blocks[0].tasks` cannot be
    /// created.
    pub fn with_paired_task_appended(&self) -> Result<(Self, usize), SpecEditError> {
        let mut next = self.value.clone();
        let tasks = ensure_first_block_tasks(&mut next)?;
        let number = tasks.len() + 1;
        tasks.push(templates::new_paired_task(number).to_value());
        let index = tasks.len() - 1;
        Ok((Self { value: next }, index))
    }

    /// New document without task `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SpecEditError::Malformed`] when `blocks[0].tasks` cannot be
    /// created, or [`SpecEditError::TaskIndexOutOfRange`] for a missing index.
    pub fn without_task(&self, index: usize) -> Result<Self, SpecEditError> {
        let mut next = self.value.clone();
        let tasks = ensure_first_block_tasks(&mut next)?;
        if index >= tasks.len() {
            return Err(SpecEditError::TaskIndexOutOfRange {
                index,
                len: tasks.len(),
            });
        }
        tasks.remove(index);
        Ok(Self { value: next })
    }
}

impl From<Value> for SpecDocument {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

/// Make sure `blocks[0].tasks` exists and return it.
///
/// A missing `blocks` (or an empty array) gets the default `main` block; a
/// missing `tasks` becomes `[]`. Present values of the wrong type are errors.
fn ensure_first_block_tasks(value: &mut Value) -> Result<&mut Vec<Value>, SpecEditError> {
    let root = value
        .as_object_mut()
        .ok_or_else(|| SpecEditError::Malformed("spec root is not an object".into()))?;

    if root.get("blocks").is_none_or(Value::is_null) {
        root.insert("blocks".into(), json!([]));
    }
    let blocks = root
        .get_mut("blocks")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| SpecEditError::Malformed("`blocks` is not an array".into()))?;
    if blocks.is_empty() {
        let default_block = serde_json::to_value(Block::default_main())
            .map_err(|error| SpecEditError::Malformed(error.to_string()))?;
        blocks.push(default_block);
    }

    let block = blocks
        .get_mut(0)
        .and_then(Value::as_object_mut)
        .ok_or_else(|| SpecEditError::Malformed("`blocks[0]` is not an object".into()))?;
    if block.get("tasks").is_none_or(Value::is_null) {
        block.insert("tasks".into(), json!([]));
    }
    block
        .get_mut("tasks")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| SpecEditError::Malformed("`blocks[0].tasks` is not an array".into()))
}

/// Fields edited by the paired-comparison form. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairedTaskPatch {
    pub prompt: Option<String>,
    pub left_text: Option<String>,
    pub right_text: Option<String>,
}

impl PairedTaskPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prompt.is_none() && self.left_text.is_none() && self.right_text.is_none()
    }

    /// Build the partial task object. `left`/`right` keep their other inner
    /// fields (such as `id`) from `current`.
    #[must_use]
    pub fn to_partial(&self, current: &Value) -> Map<String, Value> {
        let mut partial = Map::new();
        if let Some(prompt) = &self.prompt {
            partial.insert("prompt".into(), Value::String(prompt.clone()));
        }
        for (side, text) in [("left", &self.left_text), ("right", &self.right_text)] {
            if let Some(text) = text {
                let mut inner = current
                    .get(side)
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default();
                inner.insert("text".into(), Value::String(text.clone()));
                partial.insert(side.into(), Value::Object(inner));
            }
        }
        partial
    }
}

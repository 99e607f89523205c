//! Cross-cutting error types for olcme.
//!
//! Domain-specific errors (`ApiError`, `AuthError`, `ConsoleError`) live in
//! their respective crates. The binary converges them through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any olcme crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (schema, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A value could not be parsed into the expected shape.
    #[error("Invalid {field} '{value}'")]
    InvalidValue { field: String, value: String },
}

/// Errors produced by immutable edits of a spec document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecEditError {
    /// The document does not have the `{ blocks: [{ tasks: [...] }] }` shape.
    #[error("spec is malformed: {0}")]
    Malformed(String),

    /// The requested task index does not exist in `blocks[0].tasks`.
    #[error("task index {index} is out of range (task count {len})")]
    TaskIndexOutOfRange { index: usize, len: usize },
}

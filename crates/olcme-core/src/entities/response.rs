use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ResponseId, SessionId};
use crate::enums::Choice;

/// Payload of a paired-comparison answer.
///
/// `rt_ms` is always serialized, as `null` when no reaction time was measured.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChoicePayload {
    pub choice: Choice,
    pub rt_ms: Option<u64>,
}

/// Body of `POST /responses`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewResponse {
    pub session_id: SessionId,
    pub task_id: String,
    pub payload: ChoicePayload,
}

/// Response of `POST /responses`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SubmittedResponse {
    #[serde(default)]
    pub ok: bool,
    pub response_id: ResponseId,
}

/// One stored answer as read back by the results views.
///
/// `payload` stays raw JSON: rows are displayed verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResponseRow {
    pub id: ResponseId,
    pub session_id: SessionId,
    pub task_id: String,
    #[serde(default)]
    pub payload: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

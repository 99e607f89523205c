use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{InstrumentId, SessionId, StudyId};

/// Body of `POST /sessions`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewSession {
    pub instrument_id: InstrumentId,
}

/// Response of `POST /sessions`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CreatedSession {
    pub session_id: SessionId,
    pub participant_id: String,
}

/// A participant-facing instantiation of one instrument.
///
/// Immutable once created. The embedded instrument carries the spec the
/// participant runner walks.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Session {
    pub session_id: SessionId,
    pub participant_id: String,
    pub instrument: SessionInstrument,
}

/// Instrument view embedded in a [`Session`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SessionInstrument {
    pub id: InstrumentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_id: Option<StudyId>,
    pub name: String,
    #[serde(default)]
    pub spec: Value,
}

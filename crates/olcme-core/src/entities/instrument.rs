use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{InstrumentId, StudyId};

/// Instrument as returned by list and create endpoints (no spec).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct InstrumentSummary {
    pub id: InstrumentId,
    pub study_id: StudyId,
    pub name: String,
}

/// A questionnaire definition with its full spec document.
///
/// `spec` is kept as raw JSON so shapes the console does not understand survive
/// a load/save cycle untouched. Use [`crate::spec::SpecDocument`] to work with it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Instrument {
    pub id: InstrumentId,
    pub study_id: StudyId,
    pub name: String,
    #[serde(default)]
    pub spec: Value,
}

impl Instrument {
    #[must_use]
    pub fn summary(&self) -> InstrumentSummary {
        InstrumentSummary {
            id: self.id,
            study_id: self.study_id,
            name: self.name.clone(),
        }
    }
}

/// Body of `POST /instruments`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewInstrument {
    pub study_id: StudyId,
    pub name: String,
    pub spec: Value,
}

/// Body of `PUT /instruments/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SpecUpdate {
    pub spec: Value,
}

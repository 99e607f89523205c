use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::StudyId;

/// A research study grouping one or more instruments.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Study {
    pub id: StudyId,
    pub title: String,
}

/// Body of `POST /studies`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewStudy {
    pub title: String,
}

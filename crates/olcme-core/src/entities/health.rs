use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Liveness probe result (`GET /health`).
///
/// The landing view substitutes an `ok: false` value with an error text when
/// the backend cannot be reached.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HealthStatus {
    #[serde(default)]
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthStatus {
    #[must_use]
    pub fn unreachable(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
        }
    }
}

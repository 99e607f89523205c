//! Participant-facing app configuration.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, check_base_url, trim_base_url};

pub const DEFAULT_APP_BASE: &str = "https://anket.olcme.tr";

fn default_base_url() -> String {
    DEFAULT_APP_BASE.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Origin participant links are built on (`{base_url}/p/{session_id}`).
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl AppConfig {
    #[must_use]
    pub fn base_url(&self) -> &str {
        trim_base_url(&self.base_url)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the base URL is not http(s).
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_base_url("app.base_url", &self.base_url)
    }
}

//! Backend API endpoint configuration.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, check_base_url, trim_base_url};

/// Production API host.
pub const DEFAULT_API_BASE: &str = "https://api.anket.olcme.tr";

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL every REST path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl ApiConfig {
    /// Base URL without trailing slashes.
    #[must_use]
    pub fn base_url(&self) -> &str {
        trim_base_url(&self.base_url)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the base URL is not http(s).
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_base_url("api.base_url", &self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_production() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url(), "https://api.anket.olcme.tr");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ApiConfig {
            base_url: "http://localhost:8000//".into(),
        };
        assert_eq!(config.base_url(), "http://localhost:8000");
    }
}

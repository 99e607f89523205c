//! # olcme-config
//!
//! Layered configuration loading for the Ölçme Lab console using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Command-line overrides (`--api-base`, `--app-base`)
//! 2. Environment variables (`OLCME_*` prefix, `__` as separator)
//! 3. Project-level `.olcme/config.toml`
//! 4. User-level `~/.config/olcme/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `OLCME_API__BASE_URL` -> `api.base_url`,
//! `OLCME_GENERAL__DEFAULT_EMAIL` -> `general.default_email`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use olcme_config::OlcmeConfig;
//!
//! let config = OlcmeConfig::load_with_dotenv().expect("config");
//! println!("API: {}", config.api.base_url());
//! ```

mod api;
mod app;
mod error;
mod general;

pub use api::{ApiConfig, DEFAULT_API_BASE};
pub use app::{AppConfig, DEFAULT_APP_BASE};
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix shared by config and logging.
pub const ENV_PREFIX: &str = "OLCME_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OlcmeConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

/// Values given on the command line. `None` fields leave lower layers alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub api_base: Option<String>,
    pub app_base: Option<String>,
}

impl OlcmeConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`OlcmeConfig::load_with_dotenv`] for `.env`
    /// file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a layer fails to parse or a URL is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_overrides(&ConfigOverrides::default())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`OlcmeConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Load all layers, then apply command-line overrides on top.
    ///
    /// # Errors
    ///
    /// Same as [`OlcmeConfig::load`].
    pub fn load_with_overrides(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_with(overrides).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".olcme/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// [`OlcmeConfig::figment`] plus the command-line layer.
    #[must_use]
    pub fn figment_with(overrides: &ConfigOverrides) -> Figment {
        let mut figment = Self::figment();
        if let Some(api_base) = &overrides.api_base {
            figment = figment.merge(Serialized::default("api.base_url", api_base));
        }
        if let Some(app_base) = &overrides.app_base {
            figment = figment.merge(Serialized::default("app.base_url", app_base));
        }
        figment
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a base URL that is not http(s).
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.app.validate()
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("olcme").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir looking
    /// for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

pub(crate) fn trim_base_url(url: &str) -> &str {
    url.trim().trim_end_matches('/')
}

pub(crate) fn check_base_url(field: &str, url: &str) -> Result<(), ConfigError> {
    let url = trim_base_url(url);
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("'{url}' is not an http(s) URL"),
        })
    }
}

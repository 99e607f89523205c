//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_email() -> String {
    "murat@olcme.tr".to_string()
}

fn default_study_title() -> String {
    "Ölçme Lab Pilot 1".to_string()
}

fn default_instrument_name() -> String {
    "Pilot Instrument".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Email prefilled by `auth login` when `--email` is omitted.
    #[serde(default = "default_email")]
    pub default_email: String,

    /// Title used by `study create` when `--title` is omitted.
    #[serde(default = "default_study_title")]
    pub default_study_title: String,

    /// Name used by `instrument create` when `--name` is omitted.
    #[serde(default = "default_instrument_name")]
    pub default_instrument_name: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_email: default_email(),
            default_study_title: default_study_title(),
            default_instrument_name: default_instrument_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.default_email, "murat@olcme.tr");
        assert_eq!(config.default_study_title, "Ölçme Lab Pilot 1");
        assert_eq!(config.default_instrument_name, "Pilot Instrument");
    }
}

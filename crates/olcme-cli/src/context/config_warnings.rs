use olcme_config::{DEFAULT_API_BASE, DEFAULT_APP_BASE, OlcmeConfig};

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_misnamed_env(config: &OlcmeConfig) {
    for warning in collect_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_warnings<I>(config: &OlcmeConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    if config.api.base_url() == DEFAULT_API_BASE && has_single_underscore(&keys, "OLCME_API") {
        warnings.push(
            "api.base_url is the default while OLCME_API_* env vars exist. Use double underscores (example: OLCME_API__BASE_URL)."
                .to_string(),
        );
    }
    if config.app.base_url() == DEFAULT_APP_BASE && has_single_underscore(&keys, "OLCME_APP") {
        warnings.push(
            "app.base_url is the default while OLCME_APP_* env vars exist. Use double underscores (example: OLCME_APP__BASE_URL)."
                .to_string(),
        );
    }
    warnings
}

fn has_single_underscore(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| {
        key.strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('_') && !rest.starts_with("__"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn warns_for_single_underscore_keys() {
        let warnings = collect_warnings(
            &OlcmeConfig::default(),
            env(&[
                ("OLCME_API_BASE_URL", "http://localhost:8000"),
                ("OLCME_APP_BASE_URL", "http://localhost:3000"),
            ]),
        );
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("OLCME_API__BASE_URL"));
    }

    #[test]
    fn quiet_for_correct_keys() {
        let warnings = collect_warnings(
            &OlcmeConfig::default(),
            env(&[("OLCME_API__BASE_URL", "http://localhost:8000")]),
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn quiet_when_value_was_overridden() {
        let mut config = OlcmeConfig::default();
        config.api.base_url = "http://localhost:8000".into();
        let warnings = collect_warnings(&config, env(&[("OLCME_API_BASE_URL", "x")]));
        assert!(warnings.is_empty());
    }
}

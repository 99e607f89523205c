use std::path::Path;

use anyhow::Context;
use olcme_config::OlcmeConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, then every config layer with the command-line overrides on top.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<OlcmeConfig> {
    load_dotenv()?;
    OlcmeConfig::load_with_overrides(&flags.config_overrides())
        .context("failed to load olcme configuration")
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;

    // project-local config dir first, then the working directory
    for env_path in [cwd.join(".olcme").join(".env"), cwd.join(".env")] {
        if env_path.exists() {
            return load_file(&env_path);
        }
    }

    dotenvy::dotenv().ok();
    Ok(())
}

fn load_file(path: &Path) -> anyhow::Result<()> {
    dotenvy::from_path(path)
        .with_context(|| format!("failed to load dotenv file at {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded dotenv");
    Ok(())
}

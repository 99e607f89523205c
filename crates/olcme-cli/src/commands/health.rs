use olcme_core::entities::HealthStatus;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

/// `olcme health`: an unreachable backend is reported, not raised.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let status = match with_spinner("Backend kontrol ediliyor…", ctx.api.health()).await {
        Ok(status) => status,
        Err(error) => {
            tracing::debug!(%error, "health check failed");
            HealthStatus::unreachable(error.to_string())
        }
    };
    output(&status, flags.format)
}

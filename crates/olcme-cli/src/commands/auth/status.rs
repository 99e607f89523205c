use olcme_auth::expiry::TokenStatus;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Report the stored token. The expiry is decoded for display only.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&TokenStatus::inspect(&ctx.store), flags.format)
}

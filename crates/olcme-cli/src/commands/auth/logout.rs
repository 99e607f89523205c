use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::ui;

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut dashboard = ctx.dashboard();
    dashboard.logout(&ctx.store)?;
    ui::show_status(dashboard.status());
    output(&AuthLogoutResponse { cleared: true }, flags.format)
}

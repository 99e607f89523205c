use olcme_console::messages;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLoginArgs;
use crate::commands::shared::prompt::read_secret;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;
use crate::ui;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    email: String,
    studies: usize,
    instruments: usize,
}

pub async fn handle(
    args: &AuthLoginArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut dashboard = ctx.dashboard();
    dashboard.email = args
        .email
        .clone()
        .unwrap_or_else(|| ctx.config.general.default_email.clone());
    dashboard.password = match &args.password {
        Some(password) => password.clone(),
        None => read_secret("Şifre")?,
    };

    let result = with_spinner(messages::LOGGING_IN, dashboard.login(&ctx.store)).await;
    ui::show_status(dashboard.status());
    result?;

    output(
        &AuthLoginResponse {
            authenticated: true,
            email: dashboard.email.clone(),
            studies: dashboard.studies().len(),
            instruments: dashboard.instruments().len(),
        },
        flags.format,
    )
}

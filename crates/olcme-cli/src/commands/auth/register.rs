use olcme_core::entities::Credentials;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthRegisterArgs;
use crate::commands::shared::prompt::read_secret;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

#[derive(Serialize)]
struct AuthRegisterResponse {
    registered: bool,
    email: String,
}

pub async fn handle(
    args: &AuthRegisterArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let password = match &args.password {
        Some(password) => password.clone(),
        None => read_secret("Şifre")?,
    };
    let credentials = Credentials::new(args.email.trim(), password);

    let registered = with_spinner("Kayıt oluşturuluyor…", ctx.api.register(&credentials)).await?;

    output(
        &AuthRegisterResponse {
            registered: registered.ok,
            email: credentials.email,
        },
        flags.format,
    )
}

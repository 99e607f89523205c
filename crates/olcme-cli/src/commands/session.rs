use olcme_console::messages;
use serde::Serialize;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SessionCommands;
use crate::clipboard::Osc52Clipboard;
use crate::commands::shared::prompt::confirm;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;
use crate::ui;

#[derive(Serialize)]
struct SessionCreateResponse {
    session_id: i64,
    participant_id: String,
    url: String,
    copied: bool,
}

/// Handle `olcme session`.
pub async fn handle(
    action: &SessionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SessionCommands::Create {
            instrument_id,
            copy,
            open,
        } => {
            let mut dashboard = ctx.dashboard();
            let result = with_spinner(
                messages::CREATING_SESSION,
                dashboard.create_session(*instrument_id),
            )
            .await;
            ui::show_status(dashboard.status());
            let session = result?;

            let url = dashboard
                .participant_url()
                .ok_or(olcme_console::ConsoleError::NoLink)?;
            let copied = if *copy {
                let copied = dashboard.copy_link(&mut Osc52Clipboard::stderr())?;
                ui::show_status(dashboard.status());
                copied.is_some()
            } else {
                false
            };
            if *open && let Err(error) = open::that(&url) {
                tracing::warn!(%error, %url, "failed to open browser");
                ui::notice(&messages::failed(&error));
            }

            output(
                &SessionCreateResponse {
                    session_id: session.session_id,
                    participant_id: session.participant_id,
                    url,
                    copied,
                },
                flags.format,
            )
        }
        SessionCommands::Get { id } => {
            let session = with_spinner("Oturum yükleniyor…", ctx.api.get_session(*id)).await?;
            output(&session, flags.format)
        }
        SessionCommands::Delete { id, yes } => {
            ctx.require_auth()?;
            if !confirm("Oturum ve cevapları silinsin mi?", *yes) {
                ui::notice(messages::CANCELLED);
                return Err(olcme_console::ConsoleError::Cancelled.into());
            }
            with_spinner("Oturum siliniyor…", ctx.api.delete_session(&ctx.auth, *id)).await?;
            output(&json!({ "deleted": true, "id": id }), flags.format)
        }
    }
}

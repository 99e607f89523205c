use olcme_console::messages;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::StudyCommands;
use crate::commands::shared::prompt::confirm;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;
use crate::ui;

/// Handle `olcme study`.
pub async fn handle(
    action: &StudyCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.require_auth()?;
    let mut dashboard = ctx.dashboard();

    match action {
        StudyCommands::List => {
            let result = with_spinner("Studyler yükleniyor…", dashboard.refresh()).await;
            ui::show_status(dashboard.status());
            result?;
            output(&dashboard.studies(), flags.format)
        }
        StudyCommands::Create { title } => {
            dashboard.new_study_title = title
                .clone()
                .unwrap_or_else(|| ctx.config.general.default_study_title.clone());
            let result = with_spinner(messages::CREATING_STUDY, dashboard.create_study()).await;
            ui::show_status(dashboard.status());
            output(&result?, flags.format)
        }
        StudyCommands::Delete { id, yes } => {
            let result = dashboard
                .delete_study(*id, |question| confirm(question, *yes))
                .await;
            ui::show_status(dashboard.status());
            result?;
            output(&json!({ "deleted": true, "id": id }), flags.format)
        }
    }
}

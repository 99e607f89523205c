mod create;
mod edit;
mod task;

use olcme_console::{InstrumentEditor, messages};
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::InstrumentCommands;
use crate::commands::shared::prompt::confirm;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;
use crate::ui;

/// Handle `olcme instrument`.
pub async fn handle(
    action: &InstrumentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.require_auth()?;

    match action {
        InstrumentCommands::List { study } => {
            let mut dashboard = ctx.dashboard();
            let result = with_spinner("Instrumentlar yükleniyor…", dashboard.refresh()).await;
            ui::show_status(dashboard.status());
            result?;
            dashboard.select_study(*study);
            output(&dashboard.visible_instruments(), flags.format)
        }
        InstrumentCommands::Create {
            name,
            template,
            study,
        } => create::run(name.as_deref(), template, *study, ctx, flags).await,
        InstrumentCommands::Get { id } => {
            let mut editor = ctx.editor(*id);
            let result = with_spinner("Instrument yükleniyor…", editor.load())
                .await
                .cloned();
            ui::show_status(editor.status());
            let instrument = result?;
            output(
                &json!({ "instrument": instrument, "issues": editor.issues() }),
                flags.format,
            )
        }
        InstrumentCommands::Delete { id, yes } => {
            let mut dashboard = ctx.dashboard();
            let result = dashboard
                .delete_instrument(*id, |question| confirm(question, *yes))
                .await;
            ui::show_status(dashboard.status());
            result?;
            output(&json!({ "deleted": true, "id": id }), flags.format)
        }
        InstrumentCommands::Edit { id, file } => edit::run(*id, file.as_deref(), ctx, flags).await,
        InstrumentCommands::Task { action } => task::handle(action, ctx, flags).await,
    }
}

/// Load an instrument into an editor, printing the status line.
pub(crate) async fn load_editor(ctx: &AppContext, id: i64) -> anyhow::Result<InstrumentEditor> {
    let mut editor = ctx.editor(id);
    let result = with_spinner("Instrument yükleniyor…", editor.load())
        .await
        .map(drop);
    ui::show_status(editor.status());
    result?;
    Ok(editor)
}

/// Save the editor buffer, printing the status line.
pub(crate) async fn save_editor(editor: &mut InstrumentEditor) -> anyhow::Result<()> {
    let result = with_spinner(messages::SAVING, editor.save()).await;
    ui::show_status(editor.status());
    Ok(result?)
}

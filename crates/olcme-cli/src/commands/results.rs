use olcme_console::ResultsTable;
use olcme_console::results::HEADERS;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ResultsCommands;
use crate::context::AppContext;
use crate::output::output_rows;
use crate::progress::with_spinner;
use crate::ui;

/// Handle `olcme results`.
pub async fn handle(
    action: &ResultsCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.require_auth()?;

    let table = match action {
        ResultsCommands::Instrument { id } => {
            let mut editor = ctx.editor(*id);
            let result = with_spinner(
                olcme_console::messages::LOADING_RESULTS,
                editor.load_results(),
            )
            .await
            .cloned();
            ui::show_status(editor.status());
            result?
        }
        ResultsCommands::Session { id } => {
            let rows = with_spinner(
                olcme_console::messages::LOADING_RESULTS,
                ctx.api.responses_by_session(&ctx.auth, *id),
            )
            .await?;
            ResultsTable::from_rows(&rows)
        }
    };

    tracing::debug!(rows = table.len(), "results loaded");
    let cells: Vec<Vec<String>> = table.cells().into_iter().map(Vec::from).collect();
    output_rows(&table, &HEADERS, &cells, flags.format)
}

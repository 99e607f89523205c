use olcme_console::{InstrumentEditor, TaskForm, messages};
use olcme_core::spec::PairedTaskPatch;
use serde::Serialize;
use serde_json::json;

use super::{load_editor, save_editor};
use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskCommands;
use crate::cli::subcommands::instrument::TaskUpdateArgs;
use crate::commands::shared::parse::parse_object;
use crate::context::AppContext;
use crate::output::{output, output_rows};

#[derive(Debug, Serialize)]
struct TaskRow {
    index: usize,
    id: String,
    #[serde(rename = "type")]
    task_type: Option<String>,
    prompt: Option<String>,
}

const TASK_HEADERS: [&str; 4] = ["index", "id", "type", "prompt"];

/// Handle `olcme instrument task`. Every edit is saved right away.
pub async fn handle(
    action: &TaskCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TaskCommands::List { instrument_id } => {
            let editor = load_editor(ctx, *instrument_id).await?;
            list(&editor, flags)
        }
        TaskCommands::Add { instrument_id } => {
            let mut editor = load_editor(ctx, *instrument_id).await?;
            let index = editor.add_paired_task()?;
            save_editor(&mut editor).await?;
            output(
                &json!({ "added": index, "task": editor.preview() }),
                flags.format,
            )
        }
        TaskCommands::Update(args) => update(args, ctx, flags).await,
        TaskCommands::Delete {
            instrument_id,
            index,
        } => {
            let mut editor = load_editor(ctx, *instrument_id).await?;
            editor.select(*index)?;
            editor.delete_task(*index)?;
            save_editor(&mut editor).await?;
            output(
                &json!({ "deleted": index, "remaining": editor.tasks().len() }),
                flags.format,
            )
        }
        TaskCommands::Preview {
            instrument_id,
            index,
        } => {
            let mut editor = load_editor(ctx, *instrument_id).await?;
            editor.select(*index)?;
            output(&editor.preview(), flags.format)
        }
    }
}

async fn update(args: &TaskUpdateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut editor = load_editor(ctx, args.instrument_id).await?;
    editor.select(args.index)?;

    if let Some(raw) = &args.set {
        let partial = parse_object(raw, "--set")?;
        editor.update_selected(&partial)?;
    } else {
        if let Some(TaskForm::RawOnly { task_type }) = editor.form() {
            anyhow::bail!(
                "{} (task {}: {}; --set ile JSON nesnesi ver)",
                messages::NO_FORM,
                args.index,
                task_type.as_deref().unwrap_or("?")
            );
        }
        let patch = PairedTaskPatch {
            prompt: args.prompt.clone(),
            left_text: args.left.clone(),
            right_text: args.right.clone(),
        };
        anyhow::ensure!(
            !patch.is_empty(),
            "nothing to update; pass --prompt, --left, --right or --set"
        );
        editor.update_selected_paired(&patch)?;
    }

    save_editor(&mut editor).await?;
    output(&editor.preview(), flags.format)
}

fn list(editor: &InstrumentEditor, flags: &GlobalFlags) -> anyhow::Result<()> {
    let rows: Vec<TaskRow> = editor
        .tasks()
        .iter()
        .enumerate()
        .map(|(index, entry)| TaskRow {
            index,
            id: entry.display_id(index),
            task_type: entry.type_label().map(str::to_string),
            prompt: entry.prompt().map(str::to_string),
        })
        .collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.index.to_string(),
                row.id.clone(),
                row.task_type.clone().unwrap_or_default(),
                row.prompt.clone().unwrap_or_default(),
            ]
        })
        .collect();
    output_rows(&rows, &TASK_HEADERS, &cells, flags.format)
}

use std::path::Path;
use std::process::Command;

use anyhow::Context;
use serde_json::json;

use super::{load_editor, save_editor};
use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::ui;

/// Replace the spec buffer from `file`, or from `$VISUAL`/`$EDITOR`, then save.
pub async fn run(
    id: i64,
    file: Option<&Path>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut editor = load_editor(ctx, id).await?;

    let text = match file {
        Some(path) => read_text(path)?,
        None => edit_in_terminal(editor.buffer())?,
    };
    if text == editor.buffer() {
        ui::notice("Değişiklik yok.");
        return output(&json!({ "saved": false, "id": id }), flags.format);
    }

    editor.set_buffer(text);
    save_editor(&mut editor).await?;

    output(
        &json!({ "saved": true, "id": id, "tasks": editor.tasks().len() }),
        flags.format,
    )
}

fn edit_in_terminal(current: &str) -> anyhow::Result<String> {
    let file = tempfile::Builder::new()
        .prefix("olcme-spec-")
        .suffix(".json")
        .tempfile()
        .context("failed to create a temporary file")?;
    std::fs::write(file.path(), current).context("failed to write the temporary file")?;

    let editor = editor_command();
    tracing::debug!(%editor, path = %file.path().display(), "opening editor");
    let status = Command::new(&editor)
        .arg(file.path())
        .status()
        .with_context(|| format!("failed to start {editor}"))?;
    anyhow::ensure!(status.success(), "{editor} exited with {status}");

    read_text(file.path())
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn editor_command() -> String {
    ["VISUAL", "EDITOR"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "vi".to_string())
}

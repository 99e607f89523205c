//! `olcme run`: the participant runner in a terminal.

use std::io::{BufRead, Write};

use olcme_console::{ParticipantRunner, RunnerView, SubmitOutcome, TaskView, messages};
use olcme_core::enums::Choice;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RunArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

const CHOICE_HINT: &str = "1/l sol, 2/r sağ, q çıkış";

/// How an interactive run ended.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RunSummary {
    pub session_id: i64,
    pub answered: usize,
    pub finished: RunnerView,
}

pub async fn handle(args: &RunArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut runner = ctx.runner(&args.session)?;
    let loaded = with_spinner("Oturum yükleniyor…", runner.load())
        .await
        .map(drop);
    if loaded.is_err() {
        crate::ui::notice(messages::SESSION_LOAD_FAILED);
    }
    loaded?;

    let stdin = std::io::stdin();
    let summary = run_loop(&mut runner, stdin.lock(), std::io::stderr()).await?;
    output(&summary, flags.format)
}

/// Show tasks on `out` and read one answer per line from `input` until the
/// session completes, the input ends, or the participant quits.
pub async fn run_loop<R: BufRead, W: Write>(
    runner: &mut ParticipantRunner,
    mut input: R,
    mut out: W,
) -> anyhow::Result<RunSummary> {
    let mut answered = 0;

    loop {
        let view = runner.view();
        let RunnerView::Task(task) = &view else {
            if let Some(message) = view.message() {
                writeln!(out, "{message}")?;
            }
            return Ok(RunSummary {
                session_id: runner.session_id(),
                answered,
                finished: view,
            });
        };
        write_task(&mut out, task)?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 || line.trim().eq_ignore_ascii_case("q") {
            writeln!(out)?;
            return Ok(RunSummary {
                session_id: runner.session_id(),
                answered,
                finished: view,
            });
        }

        let Ok(choice) = line.parse::<Choice>() else {
            writeln!(out, "Geçersiz seçim ({CHOICE_HINT}).")?;
            continue;
        };
        match runner.submit(choice).await {
            Ok(SubmitOutcome::Advanced { .. } | SubmitOutcome::Completed) => answered += 1,
            Err(error) => {
                tracing::debug!(%error, "submit failed");
                if let Some(message) = runner.status().message() {
                    writeln!(out, "{message}")?;
                }
            }
        }
    }
}

fn write_task(out: &mut impl Write, task: &TaskView) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "[{}/{}] {}", task.index + 1, task.total, task.prompt)?;
    writeln!(out, "  1) {}", task.left)?;
    writeln!(out, "  2) {}", task.right)?;
    write!(out, "({CHOICE_HINT}) > ")?;
    out.flush()
}

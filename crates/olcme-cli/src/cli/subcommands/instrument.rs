use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Instrument commands.
#[derive(Clone, Debug, Subcommand)]
pub enum InstrumentCommands {
    /// List instruments.
    List {
        /// Only instruments of this study.
        #[arg(long)]
        study: Option<i64>,
    },
    /// Create an instrument from a template.
    Create {
        /// Defaults to `general.default_instrument_name`.
        #[arg(long)]
        name: Option<String>,
        /// paired, maxdiff or forced
        #[arg(long, default_value = "paired")]
        template: String,
        /// Defaults to the newest study.
        #[arg(long)]
        study: Option<i64>,
    },
    /// Show an instrument with its spec.
    Get { id: i64 },
    /// Delete an instrument (sessions and responses stay).
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Replace the spec from a file, or edit it in $EDITOR.
    Edit {
        id: i64,
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Edit the task list of an instrument.
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
}

/// Task-list commands. Every change is saved right away.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommands {
    /// List tasks of `blocks[0]`.
    List { instrument_id: i64 },
    /// Append a default paired-comparison task.
    Add { instrument_id: i64 },
    /// Change fields of one task.
    Update(TaskUpdateArgs),
    /// Remove one task.
    Delete { instrument_id: i64, index: usize },
    /// Show one task as a participant would see it.
    Preview { instrument_id: i64, index: usize },
}

#[derive(Clone, Debug, Args)]
pub struct TaskUpdateArgs {
    pub instrument_id: i64,
    /// Zero-based task index.
    pub index: usize,
    #[arg(long)]
    pub prompt: Option<String>,
    /// Left option text (paired comparison).
    #[arg(long)]
    pub left: Option<String>,
    /// Right option text (paired comparison).
    #[arg(long)]
    pub right: Option<String>,
    /// JSON object merged into the task, for any task type.
    #[arg(long, value_name = "JSON", conflicts_with_all = ["prompt", "left", "right"])]
    pub set: Option<String>,
}

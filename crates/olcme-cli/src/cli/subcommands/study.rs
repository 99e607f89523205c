use clap::Subcommand;

/// Study commands.
#[derive(Clone, Debug, Subcommand)]
pub enum StudyCommands {
    /// List studies, newest first.
    List,
    /// Create a study.
    Create {
        /// Defaults to `general.default_study_title`.
        #[arg(long)]
        title: Option<String>,
    },
    /// Delete a study with its instruments, sessions and responses.
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

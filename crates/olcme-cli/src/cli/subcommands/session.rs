use clap::Subcommand;

/// Session commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SessionCommands {
    /// Open a participant session for an instrument.
    Create {
        instrument_id: i64,
        /// Copy the participant link to the clipboard.
        #[arg(long)]
        copy: bool,
        /// Open the participant link in a browser.
        #[arg(long)]
        open: bool,
    },
    /// Show a session with its embedded instrument.
    Get { id: i64 },
    /// Delete a session.
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

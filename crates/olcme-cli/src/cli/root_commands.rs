use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    AuthCommands, InstrumentCommands, ResultsCommands, SessionCommands, StudyCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Check that the backend is reachable.
    Health,
    /// Authentication.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Studies.
    Study {
        #[command(subcommand)]
        action: StudyCommands,
    },
    /// Instruments and their task lists.
    Instrument {
        #[command(subcommand)]
        action: InstrumentCommands,
    },
    /// Participant sessions.
    Session {
        #[command(subcommand)]
        action: SessionCommands,
    },
    /// Raw response rows.
    Results {
        #[command(subcommand)]
        action: ResultsCommands,
    },
    /// Answer a session interactively.
    Run(RunArgs),
}

/// Arguments for `olcme run`.
#[derive(Clone, Debug, Args)]
pub struct RunArgs {
    /// Session id or participant link (`.../p/{id}`).
    pub session: String,
}

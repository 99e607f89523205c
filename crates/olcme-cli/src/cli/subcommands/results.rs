use clap::Subcommand;

/// Response-row queries.
#[derive(Clone, Debug, Subcommand)]
pub enum ResultsCommands {
    /// Rows of every session of an instrument.
    Instrument { id: i64 },
    /// Rows of one session.
    Session { id: i64 },
}

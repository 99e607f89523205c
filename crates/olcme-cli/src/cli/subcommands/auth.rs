use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Log in and store the bearer token.
    Login(AuthLoginArgs),
    /// Create an operator account.
    Register(AuthRegisterArgs),
    /// Clear stored credentials.
    Logout,
    /// Show current auth status.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    /// Defaults to `general.default_email`.
    #[arg(long)]
    pub email: Option<String>,
    /// Read from stdin when omitted.
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AuthRegisterArgs {
    #[arg(long)]
    pub email: String,
    /// Read from stdin when omitted.
    #[arg(long)]
    pub password: Option<String>,
}

use clap::Parser;
use olcme_config::ConfigOverrides;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{ColorMode, GlobalFlags, OutputFormat, ProgressMode};
pub use root_commands::Commands;

/// Top-level CLI parser for the `olcme` binary.
#[derive(Debug, Parser)]
#[command(
    name = "olcme",
    version,
    about = "Ölçme Lab - survey admin console and participant runner"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (no status lines, errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Table coloring
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorMode,

    /// Spinners for network calls
    #[arg(long, global = true, value_enum, default_value_t)]
    pub progress: ProgressMode,

    /// Backend base URL (overrides config and OLCME_API__BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_base: Option<String>,

    /// Participant app base URL used for session links
    #[arg(long, global = true, value_name = "URL")]
    pub app_base: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            color: self.color,
            progress: self.progress,
            api_base: self.api_base.clone(),
            app_base: self.app_base.clone(),
        }
    }
}

impl GlobalFlags {
    #[must_use]
    pub fn config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_base: self.api_base.clone(),
            app_base: self.app_base.clone(),
        }
    }
}

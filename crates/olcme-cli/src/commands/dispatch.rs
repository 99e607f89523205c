use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Health => commands::health::handle(ctx, flags).await,
        Commands::Auth { action } => commands::auth::handle(&action, ctx, flags).await,
        Commands::Study { action } => commands::study::handle(&action, ctx, flags).await,
        Commands::Instrument { action } => commands::instrument::handle(&action, ctx, flags).await,
        Commands::Session { action } => commands::session::handle(&action, ctx, flags).await,
        Commands::Results { action } => commands::results::handle(&action, ctx, flags).await,
        Commands::Run(args) => commands::run::handle(&args, ctx, flags).await,
    }
}

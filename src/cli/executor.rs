//! Command executor for dispatching CLI commands

use super::handlers::{CheckCommandHandler, RunCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::AppResult;

/// Execute the parsed command with merged settings.
///
/// Without a subcommand, `run` reads snapshots from stdin.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    match &cli.command {
        Some(Commands::Check) => CheckCommandHandler::new(settings).execute().await,
        Some(Commands::Run { input }) => {
            RunCommandHandler::new(settings)
                .execute(input.as_deref())
                .await?;
            Ok(())
        }
        None => {
            RunCommandHandler::new(settings).execute(None).await?;
            Ok(())
        }
    }
}

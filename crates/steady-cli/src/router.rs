//! Command routing logic for CLI

use crate::args::{Cli, Commands, ConfigAction};
use crate::commands;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> anyhow::Result<()> {
    let config = cli.config.as_deref();
    match cli.command {
        Commands::Request(args) => commands::request::execute(config, args, cli.verbose).await,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(config),
        },
    }
}

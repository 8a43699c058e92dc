//! Trading console CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, OutputFormat};
use std::path::Path;
use tracing::warn;
use tradedesk_config::{load_config_or_default, AppConfig};
use tradedesk_core::error::SessionError;
use tradedesk_monitor::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::ValidateConfig(args) = cli.command {
        return cli::commands::validate::run(&cli.config, args).await;
    }

    let config = load_config_or_default(Some(&cli.config))
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    config.validate()?;

    // Setup logging
    let log_level = cli
        .log_level
        .as_ref()
        .map(|l| l.as_str())
        .unwrap_or(config.logging.level.as_str());
    let json = cli.json_logs || config.logging.format == "json";
    let _log_guard = setup_logging(log_level, json, config.logging.file.as_deref().map(Path::new));

    // Execute command
    let output = cli.output;
    match cli.command {
        Commands::Expiry(args) => cli::commands::expiry::run(args, output).await,
        Commands::ValidateConfig(_) => Ok(()),
        command => run_with_console(command, &config, output).await,
    }
}

/// Run a command that talks to the broker session.
async fn run_with_console(command: Commands, config: &AppConfig, output: OutputFormat) -> Result<()> {
    let console = cli::open_console(config).await?;

    let result = match command {
        Commands::Validate(args) => cli::commands::symbol::run(args, &console, output).await,
        Commands::Resolve(args) => cli::commands::resolve::run(args, &console, output).await,
        Commands::Quote(args) => cli::commands::quote::run(args, &console, output).await,
        Commands::History(args) => cli::commands::history::run(args, &console, output).await,
        Commands::Indicators(args) => cli::commands::indicators::run(args, &console, output).await,
        Commands::Positions => cli::commands::positions::run(&console, output).await,
        Commands::Order(args) => cli::commands::order::run(args, &console, output).await,
        Commands::Expiry(_) | Commands::ValidateConfig(_) => Ok(()),
    };

    finish(result, console.disconnect().await)
}

/// Combine a command's outcome with the disconnect that follows it.
///
/// The command's own error wins; a failed disconnect after it is only logged.
fn finish(result: Result<()>, disconnect: Result<(), SessionError>) -> Result<()> {
    match (result, disconnect) {
        (Err(e), Err(disconnect_err)) => {
            warn!("Disconnect after failed command also failed: {}", disconnect_err);
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), Err(disconnect_err)) => Err(disconnect_err).context("Failed to disconnect"),
        (Ok(()), Ok(())) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_survives_failed_disconnect() {
        let err = finish(Err(anyhow::anyhow!("Order rejected")), Err(SessionError::NotConnected))
            .unwrap_err();
        assert_eq!(err.to_string(), "Order rejected");

        let err = finish(Ok(()), Err(SessionError::NotConnected)).unwrap_err();
        assert_eq!(err.to_string(), "Failed to disconnect");

        assert!(finish(Ok(()), Ok(())).is_ok());
    }
}

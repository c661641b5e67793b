//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and configuration loading.

use super::handlers::{SendCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::logger::LogLevelHandle;

/// Execute a CLI command with the given settings
///
/// Running without a subcommand starts the server. `log_level` is handed to
/// the server for `PUT /log-level`.
///
/// # Errors
/// Returns errors from command handlers or validation failures
pub async fn execute_command(
    cli: &Cli,
    settings: Settings,
    log_level: Option<LogLevelHandle>,
) -> AppResult<()> {
    validate_command_args(cli)?;

    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) => {
            ServeCommandHandler::new(settings)
                .with_log_level(log_level)
                .execute(*dry_run)
                .await
        }
        None => {
            ServeCommandHandler::new(settings)
                .with_log_level(log_level)
                .execute(false)
                .await
        }
        Some(command @ Commands::Send { .. }) => {
            let message = command.message().ok_or_else(|| AppError::BadRequest {
                message: "send command carries no message".to_string(),
            })?;
            SendCommandHandler::new(settings)
                .execute(message)
                .await
                .map(|_| ())
        }
    }
}

/// Validate command arguments before execution
fn validate_command_args(cli: &Cli) -> AppResult<()> {
    cli.validate().map_err(|reason| AppError::Validation {
        field: "cli_arguments".to_string(),
        reason,
    })?;

    if let Some(Commands::Serve {
        host: Some(host),
        port: Some(port),
        ..
    }) = &cli.command
        && *port < 1024
        && host == "0.0.0.0"
    {
        eprintln!(
            "Warning: Binding to 0.0.0.0 on port {} requires root privileges",
            port
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[tokio::test]
    async fn test_execute_serve_dry_run() {
        let cli = Cli::try_parse_from(["alerthub-rs", "serve", "--dry-run"]).unwrap();

        let result = execute_command(&cli, Settings::default(), None).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_execute_send_without_channels() {
        let cli = Cli::try_parse_from(["alerthub-rs", "send", "ping"]).unwrap();

        let result = execute_command(&cli, Settings::default(), None).await;
        assert!(matches!(result, Err(AppError::NoChannelConfigured)));
    }

    #[test]
    fn test_validate_command_args() {
        let cli = Cli::try_parse_from(["alerthub-rs", "serve", "--port", "8080"]).unwrap();
        assert!(validate_command_args(&cli).is_ok());
    }

    #[test]
    fn test_validate_conflicting_args() {
        let cli = Cli {
            command: None,
            config: None,
            env: None,
            verbose: true,
            quiet: true,
        };

        match validate_command_args(&cli) {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "cli_arguments"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }
}

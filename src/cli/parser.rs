//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::build;
use crate::models::NotificationMessage;

/// Alert relay for Bark and Telegram
#[derive(Parser, Debug)]
#[command(name = "alerthub-rs")]
#[command(about = "Relays alerts and Alertmanager webhooks to Bark and Telegram")]
#[command(long_about = "
alerthub-rs accepts generic alerts and Prometheus Alertmanager webhooks over
HTTP and relays each one concurrently to every configured notification
channel (Bark push, Telegram chat).

EXAMPLES:
    # Start the server with default configuration
    alerthub-rs serve

    # Start server on custom host and port
    alerthub-rs serve --host 0.0.0.0 --port 8080

    # Use custom configuration file
    alerthub-rs --config /path/to/config.toml serve

    # Check configuration and list the configured channels
    alerthub-rs serve --dry-run

    # Send a test alert through every configured channel
    alerthub-rs send \"Disk almost full\" --title \"db-1\" --group infra

Channel credentials can also come from BARK_KEY, BARK_URL,
TELEGRAM_BOT_TOKEN, TELEGRAM_CHAT_ID and SOCKS_PROXY.
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load this single TOML file instead of the layered `config/` directory.
    /// The file must exist and be readable.
    ///
    /// Example: --config /etc/alerthub/production.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects the `{environment}.toml` overlay, overriding ALERTHUB_APP_ENV.
    ///
    /// Available values: development (dev), test, staging, production (prod)
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Increases log output to debug level, which includes every outbound
    /// payload. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Reduces log output to error level only.
    /// Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Launches the HTTP server exposing /alert and /alertmanager-webhook.
    ///
    /// Examples:
    ///   alerthub-rs serve                           # Start with defaults
    ///   alerthub-rs serve --host 0.0.0.0 --port 80 # Bind to all interfaces on port 80
    ///   alerthub-rs serve --dry-run                 # Validate config without starting
    Serve {
        /// Host address to bind to
        ///
        /// Use 127.0.0.1 for localhost only, or 0.0.0.0 to accept connections
        /// from any interface.
        ///
        /// Default: 127.0.0.1
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        ///
        /// Default: 8000
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override
        ///
        /// Overrides both configuration file settings and global --verbose/--quiet flags.
        ///
        /// Available levels: error, warn, info, debug, trace
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        ///
        /// Reports the bind address and the configured channels without
        /// starting the server. Returns exit code 0 if valid, non-zero if invalid.
        #[arg(long)]
        dry_run: bool,
    },
    /// Send one message through every configured channel
    ///
    /// Prints the outcome of each channel and exits non-zero if any
    /// channel failed.
    ///
    /// Examples:
    ///   alerthub-rs send "test message"
    ///   alerthub-rs send "Disk 95%" --title db-1 --level timeSensitive --group infra
    Send {
        /// Message body
        #[arg(value_name = "BODY", value_parser = super::validation::validate_message_body)]
        body: String,

        /// Message title
        #[arg(long)]
        title: Option<String>,

        /// Bark interruption level (active, timeSensitive, passive)
        #[arg(long)]
        level: Option<String>,

        /// Link attached to the message
        #[arg(long)]
        url: Option<String>,

        /// Group name
        #[arg(long)]
        group: Option<String>,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl Cli {
    /// Validate CLI arguments beyond what clap checks
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        if let Some(Commands::Send { url: Some(url), .. }) = &self.command
            && url.trim().is_empty()
        {
            return Err("--url cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Commands {
    /// Message described by a `send` invocation
    pub fn message(&self) -> Option<NotificationMessage> {
        match self {
            Commands::Send {
                body,
                title,
                level,
                url,
                group,
            } => Some(NotificationMessage {
                body: body.clone(),
                title: title.clone(),
                level: level.clone(),
                url: url.clone(),
                group: group.clone(),
            }),
            Commands::Serve { .. } => None,
        }
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_flag() {
        let err = Cli::try_parse_from(["alerthub-rs", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["alerthub-rs", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_default_behavior() {
        let cli = Cli::try_parse_from(["alerthub-rs"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(cli.config.is_none());
        assert!(cli.env.is_none());
    }

    #[test]
    fn test_serve_command() {
        let cli =
            Cli::try_parse_from(["alerthub-rs", "serve", "--host", "0.0.0.0", "--port", "8080"])
                .unwrap();
        if let Some(Commands::Serve {
            host,
            port,
            log_level: _,
            dry_run,
        }) = cli.command
        {
            assert_eq!(host, Some("0.0.0.0".to_string()));
            assert_eq!(port, Some(8080));
            assert!(!dry_run);
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    fn test_send_command_builds_message() {
        let cli = Cli::try_parse_from([
            "alerthub-rs",
            "send",
            "disk full",
            "--title",
            "db-1",
            "--group",
            "infra",
        ])
        .unwrap();

        let message = cli.command.as_ref().and_then(Commands::message).unwrap();
        assert_eq!(message.body, "disk full");
        assert_eq!(message.title(), Some("db-1"));
        assert_eq!(message.group(), Some("infra"));
        assert_eq!(message.url(), None);
    }

    #[test]
    fn test_send_requires_non_empty_body() {
        assert!(Cli::try_parse_from(["alerthub-rs", "send"]).is_err());
        assert!(Cli::try_parse_from(["alerthub-rs", "send", ""]).is_err());
    }

    #[test]
    fn test_env_alias() {
        let cli = Cli::try_parse_from(["alerthub-rs", "--env", "prod"]).unwrap();
        let env: crate::config::Environment = cli.env.unwrap().into();
        assert_eq!(env, crate::config::Environment::Production);
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let err = Cli::try_parse_from(["alerthub-rs", "--verbose", "--quiet"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_validate_rejects_blank_url() {
        let cli = Cli::try_parse_from(["alerthub-rs", "send", "x", "--url", " "]).unwrap();
        assert!(cli.validate().is_err());
    }
}

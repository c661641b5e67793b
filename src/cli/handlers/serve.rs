//! Serve command handler
//!
//! Handles the serve command including dry-run validation and server startup.

use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::logger::LogLevelHandle;
use crate::server::Server;
use crate::services::NotificationService;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
    log_level: Option<LogLevelHandle>,
}

impl ServeCommandHandler {
    /// Create a new serve command handler
    pub fn new(config: Settings) -> Self {
        Self {
            config,
            log_level: None,
        }
    }

    /// Handle the server uses for runtime log level changes
    pub fn with_log_level(mut self, handle: Option<LogLevelHandle>) -> Self {
        self.log_level = handle;
        self
    }

    /// Execute the serve command with optional dry-run support
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Server startup errors (if not dry-run)
    pub async fn execute(self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            return self.validate_only();
        }

        Server::new(self.config)
            .with_log_level(self.log_level)
            .run()
            .await
            .map_err(|source| AppError::Internal { source })
    }

    /// Validate configuration and channel setup without starting the server
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;
        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        for warning in self.config.warnings() {
            println!("! {}", warning);
        }

        // Builds the HTTP client and providers exactly as the server would
        let service = NotificationService::from_config(&self.config.channels)?;
        let channels = service.channel_names();
        if channels.is_empty() {
            println!("! No notification channel configured; alerts would be rejected");
        } else {
            println!("✓ Channels: {}", channels.join(", "));
        }
        if self.config.channels.proxy_url().is_some() {
            println!("✓ Outbound proxy configured");
        }

        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_handler_new() {
        let config = Settings::default();
        let handler = ServeCommandHandler::new(config.clone());
        assert_eq!(handler.config, config);
        assert!(handler.log_level.is_none());
    }

    #[tokio::test]
    async fn test_serve_handler_dry_run() {
        let mut config = Settings::default();
        config.channels.bark.key = "device".to_string();

        let result = ServeCommandHandler::new(config).execute(true).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_serve_handler_dry_run_without_channels() {
        let result = ServeCommandHandler::new(Settings::default())
            .execute(true)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_serve_handler_dry_run_invalid_config() {
        let mut config = Settings::default();
        config.server.port = 0;

        let result = ServeCommandHandler::new(config).execute(true).await;
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_serve_handler_dry_run_incomplete_telegram() {
        let mut config = Settings::default();
        config.channels.telegram.bot_token = "123:abc".to_string();

        let result = ServeCommandHandler::new(config).execute(true).await;
        assert!(result.is_err());
    }
}

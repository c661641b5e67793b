//! Configuration validation logic
//!
//! Each section checks its own values; [`Settings::validate`] runs them all
//! and reports the first failure with the offending key.

use reqwest::Url;

use crate::config::error::ConfigError;
use crate::config::settings::{ChannelsConfig, LoggerSettings, ServerConfig, Settings};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

/// Proxy schemes understood by the HTTP transport
const VALID_PROXY_SCHEMES: &[&str] = &["http", "https", "socks5", "socks5h"];

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Port must be between 1 and 65535
    /// - Request timeout must be greater than 0
    /// - Keep-alive timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.keep_alive_timeout == 0 {
            return Err(ConfigError::validation(
                "server.keep_alive_timeout",
                "Keep-alive timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if self.file.enabled && self.file.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.file.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.file.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        Ok(())
    }
}

impl ChannelsConfig {
    /// Validate channel and transport configuration
    ///
    /// Unconfigured channels are not checked beyond their base URLs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_workers == 0 {
            return Err(ConfigError::validation(
                "channels.max_workers",
                "At least one worker is required.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "channels.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.connect_timeout == 0 {
            return Err(ConfigError::validation(
                "channels.connect_timeout",
                "Connect timeout must be greater than 0 seconds.",
            ));
        }

        check_http_url("channels.bark.url", &self.bark.url)?;
        check_http_url("channels.telegram.api_base", &self.telegram.api_base)?;

        if self.telegram.is_configured() && self.telegram.chat_id.trim().is_empty() {
            return Err(ConfigError::validation(
                "channels.telegram.chat_id",
                "Chat id is required when a Telegram bot token is set.",
            ));
        }

        if let Some(proxy) = self.proxy_url() {
            let scheme = Url::parse(proxy)
                .map(|url| url.scheme().to_string())
                .map_err(|e| ConfigError::ValidationError {
                    field: "channels.proxy".to_string(),
                    message: format!("Invalid proxy URL '{}': {}", proxy, e),
                })?;
            if !VALID_PROXY_SCHEMES.contains(&scheme.as_str()) {
                return Err(ConfigError::ValidationError {
                    field: "channels.proxy".to_string(),
                    message: format!(
                        "Unsupported proxy scheme '{}'. Valid schemes are: {}",
                        scheme,
                        VALID_PROXY_SCHEMES.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }
}

fn check_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let valid = Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false);
    if valid {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            field: field.to_string(),
            message: format!("Expected an http(s) URL, got '{}'", value),
        })
    }
}

impl ChannelsConfig {
    /// Worst-case seconds for one channel send
    ///
    /// Every retried attempt fails at the connect timeout; the last one may
    /// run to the request timeout.
    pub fn send_budget_secs(&self) -> u64 {
        self.connect_timeout
            .saturating_mul(u64::from(self.max_retries))
            .saturating_add(self.request_timeout)
    }
}

impl Settings {
    /// Validate all configuration sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.logger.validate()?;
        self.channels.validate()?;
        Ok(())
    }

    /// Valid but suspicious combinations, reported at startup
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let budget = self.channels.send_budget_secs();
        if self.server.request_timeout < budget {
            warnings.push(format!(
                "server.request_timeout ({}s) is shorter than the worst-case channel send ({}s); \
                 slow deliveries are answered with 408 while the sends keep running",
                self.server.request_timeout, budget
            ));
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(result: Result<(), ConfigError>) -> String {
        match result {
            Err(ConfigError::ValidationError { field, .. }) => field,
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_server_config_invalid_port_zero() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_eq!(field_of(config.validate()), "server.port");
    }

    #[test]
    fn test_server_config_invalid_timeouts() {
        let config = ServerConfig {
            request_timeout: 0,
            ..Default::default()
        };
        assert_eq!(field_of(config.validate()), "server.request_timeout");

        let config = ServerConfig {
            keep_alive_timeout: 0,
            ..Default::default()
        };
        assert_eq!(field_of(config.validate()), "server.keep_alive_timeout");
    }

    #[test]
    fn test_logger_settings_levels() {
        for level in ["trace", "debug", "info", "warn", "error", "INFO"] {
            let settings = LoggerSettings {
                level: level.to_string(),
                ..Default::default()
            };
            assert!(settings.validate().is_ok(), "level {} should be valid", level);
        }

        let settings = LoggerSettings {
            level: "loud".to_string(),
            ..Default::default()
        };
        assert_eq!(field_of(settings.validate()), "logger.level");
    }

    #[test]
    fn test_logger_settings_file_enabled_empty_path() {
        let mut settings = LoggerSettings::default();
        settings.file.enabled = true;
        settings.file.path = "  ".to_string();
        assert_eq!(field_of(settings.validate()), "logger.file.path");
    }

    #[test]
    fn test_logger_settings_invalid_format() {
        let mut settings = LoggerSettings::default();
        settings.file.format = "xml".to_string();
        assert_eq!(field_of(settings.validate()), "logger.file.format");
    }

    #[test]
    fn test_channels_zero_workers() {
        let config = ChannelsConfig {
            max_workers: 0,
            ..Default::default()
        };
        assert_eq!(field_of(config.validate()), "channels.max_workers");
    }

    #[test]
    fn test_channels_zero_timeouts() {
        let config = ChannelsConfig {
            request_timeout: 0,
            ..Default::default()
        };
        assert_eq!(field_of(config.validate()), "channels.request_timeout");

        let config = ChannelsConfig {
            connect_timeout: 0,
            ..Default::default()
        };
        assert_eq!(field_of(config.validate()), "channels.connect_timeout");
    }

    #[test]
    fn test_channels_bark_url_must_be_http() {
        let mut config = ChannelsConfig::default();
        config.bark.url = "ftp://bark.example.com".to_string();
        assert_eq!(field_of(config.validate()), "channels.bark.url");

        config.bark.url = "not a url".to_string();
        assert_eq!(field_of(config.validate()), "channels.bark.url");

        config.bark.url = "http://127.0.0.1:8080/".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_channels_telegram_requires_chat_id() {
        let mut config = ChannelsConfig::default();
        config.telegram.bot_token = "123:abc".to_string();
        assert_eq!(field_of(config.validate()), "channels.telegram.chat_id");

        config.telegram.chat_id = "42".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_channels_proxy_schemes() {
        for proxy in [
            "http://proxy:3128",
            "https://proxy:3128",
            "socks5://127.0.0.1:1080",
            "socks5h://127.0.0.1:1080",
        ] {
            let config = ChannelsConfig {
                proxy: Some(proxy.to_string()),
                ..Default::default()
            };
            assert!(config.validate().is_ok(), "proxy {} should be valid", proxy);
        }

        let config = ChannelsConfig {
            proxy: Some("ftp://proxy:21".to_string()),
            ..Default::default()
        };
        assert_eq!(field_of(config.validate()), "channels.proxy");

        let config = ChannelsConfig {
            proxy: Some("127.0.0.1:1080".to_string()),
            ..Default::default()
        };
        assert_eq!(field_of(config.validate()), "channels.proxy");
    }

    #[test]
    fn test_settings_reports_first_invalid_section() {
        let mut settings = Settings::default();
        settings.server.port = 0;
        settings.channels.max_workers = 0;
        assert_eq!(field_of(settings.validate()), "server.port");
    }

    #[test]
    fn test_send_budget_counts_connect_retries() {
        let channels = ChannelsConfig {
            max_retries: 3,
            connect_timeout: 5,
            request_timeout: 10,
            ..Default::default()
        };
        assert_eq!(channels.send_budget_secs(), 25);

        let no_retries = ChannelsConfig {
            max_retries: 0,
            ..channels
        };
        assert_eq!(no_retries.send_budget_secs(), 10);
    }

    #[test]
    fn test_default_settings_have_no_warnings() {
        assert!(Settings::default().warnings().is_empty());
    }

    #[test]
    fn test_short_server_timeout_is_warned() {
        let mut settings = Settings::default();
        settings.server.request_timeout = 20;

        let warnings = settings.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("server.request_timeout (20s)"));
        assert!(warnings[0].contains("(25s)"));
        // Still a valid configuration
        assert!(settings.validate().is_ok());
    }
}

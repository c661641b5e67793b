//! Configuration management module for alerthub-rs
//!
//! # Configuration Priority (lowest to highest)
//! 1. `default.toml` - Base default configuration
//! 2. `{environment}.toml` - Environment-specific configuration
//! 3. `local.toml` - Local overrides (not committed to version control)
//! 4. `ALERTHUB_*` environment variables
//! 5. Legacy variables: `BARK_KEY`, `BARK_URL`, `TELEGRAM_BOT_TOKEN`,
//!    `TELEGRAM_CHAT_ID`, `SOCKS_PROXY`

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{BarkSettings, ChannelsConfig, Settings, TelegramSettings};

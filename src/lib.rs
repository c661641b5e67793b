//! alerthub-rs library
//!
//! Alert relay: accepts generic alerts and Alertmanager webhooks over HTTP
//! and fans each message out to Bark and Telegram.

use shadow_rs::shadow;
shadow!(build);

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod models;
pub mod server;
pub mod services;
pub mod state;
pub mod utils;

pub use state::AppState;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

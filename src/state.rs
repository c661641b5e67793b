//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::config::Settings;
use crate::error::AppResult;
use crate::logger::LogLevelHandle;
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// This struct is designed to be used with Axum's State extractor.
/// Cloning is cheap since Services and Settings sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Immutable settings the process was started with
    pub settings: Arc<Settings>,
    /// Reload handle of the global log filter, absent when no subscriber
    /// was installed by this process
    pub log_level: Option<LogLevelHandle>,
}

impl AppState {
    /// Builds the notification channels from the settings.
    ///
    /// Fails when a configured channel is incomplete or the HTTP client
    /// cannot be built (e.g. an unusable proxy URL).
    pub fn new(settings: Settings) -> AppResult<Self> {
        let services = Services::new(&settings)?;
        Ok(Self {
            services,
            settings: Arc::new(settings),
            log_level: None,
        })
    }

    /// Enables runtime log level changes through `handle`
    pub fn with_log_level(mut self, handle: LogLevelHandle) -> Self {
        self.log_level = Some(handle);
        self
    }
}

//! Service layer for business logic operations.
//!
//! Services encapsulate the relay pipeline and are shared by the HTTP
//! handlers and the CLI.

pub mod alertmanager;
pub mod notifications;

pub use notifications::NotificationService;

use crate::config::Settings;
use crate::error::AppResult;

/// Aggregates all services for convenient access.
///
/// Used as part of the Axum application state. Cloning is cheap since the
/// underlying providers and pools sit behind `Arc`.
#[derive(Clone)]
pub struct Services {
    pub notifications: NotificationService,
}

impl Services {
    pub fn new(settings: &Settings) -> AppResult<Self> {
        Ok(Self {
            notifications: NotificationService::from_config(&settings.channels)?,
        })
    }
}

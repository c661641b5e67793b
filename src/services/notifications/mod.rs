//! Notification system with pluggable providers.
//!
//! `NotificationProvider` is implemented once per outbound channel; the
//! dispatcher fans a message out to all of them concurrently.

mod bark_provider;
mod dispatcher;
mod provider;
mod telegram_provider;

pub mod notification_service;

pub use bark_provider::BarkProvider;
pub use dispatcher::Dispatcher;
pub use notification_service::NotificationService;
pub use provider::NotificationProvider;
pub use telegram_provider::TelegramProvider;

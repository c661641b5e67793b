//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `alert` - Alert submission and relay result DTOs
//! - `error` - Common error response DTOs
//! - `health` - Health check DTOs
//! - `log_level` - Runtime log filter DTOs

mod alert;
mod error;
mod health;
mod log_level;

pub use alert::{SendAlertRequest, SendAlertResponse};
pub use error::{ErrorResponse, FAILED_RESULT};
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use log_level::{LogLevelRequest, LogLevelResponse};

//! Runtime log level DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// New filter for `PUT /log-level`
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[schema(example = json!({"level": "alerthub_rs=debug,info"}))]
pub struct LogLevelRequest {
    /// Level name or `EnvFilter` directives
    #[validate(length(min = 1, message = "Level cannot be empty"))]
    pub level: String,
}

/// Active log filter
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LogLevelResponse {
    pub level: String,
}

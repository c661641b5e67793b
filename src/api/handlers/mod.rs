//! HTTP request handlers for API endpoints.
//!
//! This module contains all request handlers organized by resource type.

pub mod alerts;
pub mod health;
pub mod log_level;

//! Outbound integrations

pub mod client;

pub use client::{HttpTransport, ProviderResponse, TransportError};

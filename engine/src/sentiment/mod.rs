// Text sentiment from a hosted three-class classifier; any failure degrades to neutral.

pub mod client;
pub mod labels;

pub use client::SentimentClient;

use std::time::Duration;

/// Injected once at startup and shared read-only by every request.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentConfig {
    pub api_url: String,
    pub api_token: String,
    pub request_timeout: Duration,
    pub health_timeout: Duration,
}

//! Error Types for Market Intelligence

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IntelError>;

#[derive(Error, Debug)]
pub enum IntelError {
    /// Upstream explicitly told us to back off (HTTP 429).
    #[error("Provider rate limited: {0}")]
    RateLimited(String),

    /// Upstream reachable but returned a non-success status.
    #[error("Provider error: {0}")]
    Upstream(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IntelError {
    /// True when the upstream explicitly signalled rate limiting;
    /// every other variant counts as "upstream unavailable".
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, IntelError::RateLimited(_))
    }
}

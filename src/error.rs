//! Error types for the topic-scout crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. Per-source network and parse failures are
//! isolated inside the aggregator and never surface through this type;
//! the only error ordinary callers see is invalid configuration.

/// Errors that can occur during pipeline operations.
#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    /// An HTTP request to a search backend or page failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse a backend response (HTML, JSON or RSS).
    #[error("parse error: {0}")]
    Parse(String),

    /// A request timed out before the backend responded.
    #[error("timed out: {0}")]
    Timeout(String),

    /// Invalid pipeline configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for topic-scout results.
pub type Result<T> = std::result::Result<T, ScoutError>;

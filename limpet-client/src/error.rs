//! Client error types

use thiserror::Error;

/// Client error type
///
/// `Config` is the only variant that should reach the user as a hard
/// failure ("configure the app"); network and response-shape problems are
/// recovered internally by falling back to the last known snapshot.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Channel or socket level failure
    #[error("Connection error: {0}")]
    Connection(String),

    /// Unexpected response shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// No usable configuration (e.g. no tenant resolvable)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Durable local storage failure
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

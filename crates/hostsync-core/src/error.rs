//! Error types for the hostsync pipeline
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for hostsync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the hostsync pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Record file exists but is not a valid array of [name, address] pairs
    #[error("Decode error: {0}")]
    Decode(String),

    /// Record source-related errors
    #[error("Record source error: {0}")]
    Source(String),

    /// Record store-related errors
    #[error("Record store error: {0}")]
    Store(String),

    /// Failure writing the hosts file, README, or JSON snapshot
    #[error("Publish error: {0}")]
    Publish(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a record source error
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// Create a record store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create a publish error
    pub fn publish(msg: impl Into<String>) -> Self {
        Self::Publish(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the error is worth retrying
    ///
    /// Only transient read failures qualify. Decode failures are
    /// deterministic and retrying them would loop on the same bad file.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Source(_) | Self::Store(_) | Self::Io(_))
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

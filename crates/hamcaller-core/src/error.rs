//! Error types for HamCaller

use std::time::Duration;

/// Result type alias using HamCaller's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for HamCaller operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The model runtime is not installed, not running, or refused the call
    #[error("model runtime unavailable: {0}")]
    RuntimeUnavailable(String),

    /// The model runtime did not answer within the configured bound
    #[error("model runtime timed out after {}s", .0.as_secs_f64())]
    RuntimeTimeout(Duration),

    /// The model runtime answered with something we could not read
    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new runtime-unavailable error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::RuntimeUnavailable(msg.into())
    }

    /// Create a new malformed-response error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RuntimeUnavailable(_) => "runtime_unavailable",
            Self::RuntimeTimeout(_) => "runtime_timeout",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Config(_) => "config_error",
            Self::Io(_) => "io_error",
            Self::Serialization(_) => "serialization_error",
        }
    }
}

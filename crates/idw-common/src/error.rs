//! Error types for the idw-overlay crates.

use thiserror::Error;

/// Result type alias using IdwError.
pub type IdwResult<T> = Result<T, IdwError>;

/// Primary error type for IDW overlay operations.
#[derive(Debug, Error)]
pub enum IdwError {
    // === Configuration Errors ===
    #[error("Invalid configuration for '{param}': {message}")]
    InvalidConfiguration { param: String, message: String },

    #[error("Malformed gradient: {0}")]
    MalformedGradient(String),

    // === Output Errors ===
    #[error("Snapshot failed: {0}")]
    SnapshotError(String),
}

impl IdwError {
    /// Shorthand for an `InvalidConfiguration` error.
    pub fn invalid(param: &str, message: impl Into<String>) -> Self {
        IdwError::InvalidConfiguration {
            param: param.to_string(),
            message: message.into(),
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for IdwError {
    fn from(err: std::io::Error) -> Self {
        IdwError::SnapshotError(err.to_string())
    }
}

impl From<serde_json::Error> for IdwError {
    fn from(err: serde_json::Error) -> Self {
        IdwError::MalformedGradient(format!("JSON error: {}", err))
    }
}

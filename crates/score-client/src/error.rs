//! Score client errors

use thiserror::Error;

/// Failures talking to the score service
#[derive(Debug, Error)]
pub enum ScoreClientError {
    /// Request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The service rejected the credentials
    #[error("Unauthorized ({status}): {message}")]
    Unauthorized {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Any other non-success status
    #[error("Score service returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Response body was not a high score record
    #[error("Failed to parse high score: {0}")]
    Parse(#[from] serde_json::Error),

    /// Client could not be constructed
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ScoreClientError {
    /// Whether retrying later may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            ScoreClientError::Network(_) => true,
            ScoreClientError::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

/// Result type for score client operations
pub type Result<T> = std::result::Result<T, ScoreClientError>;

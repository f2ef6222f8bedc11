//! Error types for embedding calls

use thiserror::Error;

/// Result type for embedding operations
pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

/// Failures of the external embedding collaborator
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Transport-level failure (connection refused, reset, ...)
    #[error("Embedding request failed: {reason}")]
    Request { reason: String },

    /// The service answered with a non-success status
    #[error("Embedding service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The request exceeded the configured timeout
    #[error("Embedding request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Body could not be decoded as an embedding
    #[error("Invalid embedding response: {reason}")]
    InvalidResponse { reason: String },

    /// Vector length differs from the configured dimension
    #[error("Embedding has dimension {actual}, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Configuration error
    #[error("Configuration error: {reason}")]
    InvalidConfig { reason: String },
}

impl EmbeddingError {
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            EmbeddingError::Timeout { timeout_ms }
        } else if err.is_decode() {
            EmbeddingError::InvalidResponse {
                reason: err.to_string(),
            }
        } else {
            EmbeddingError::Request {
                reason: err.to_string(),
            }
        }
    }
}

//! Query error types

use serde::Serialize;
use thiserror::Error;

use crate::embeddings::EmbeddingError;
use crate::vector::VectorError;

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Failures that abort a similarity query
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Query text is empty")]
    EmptyQuery,

    #[error("Invalid result count {k}: must be between 1 and {max}")]
    InvalidK { k: usize, max: usize },

    #[error(transparent)]
    Vector(#[from] VectorError),

    #[error("Embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),
}

/// Coarse classification used by the transport layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QueryErrorKind {
    EmptyQuery,
    EmptyInput,
    DimensionMismatch,
    ZeroVector,
    EmptyIndex,
    EmbeddingFailure,
    InvalidRequest,
}

impl QueryError {
    pub fn kind(&self) -> QueryErrorKind {
        match self {
            QueryError::EmptyQuery => QueryErrorKind::EmptyQuery,
            QueryError::InvalidK { .. } => QueryErrorKind::InvalidRequest,
            QueryError::Vector(VectorError::EmptyInput) => QueryErrorKind::EmptyInput,
            QueryError::Vector(VectorError::DimensionMismatch { .. }) => {
                QueryErrorKind::DimensionMismatch
            }
            QueryError::Vector(VectorError::ZeroVector) => QueryErrorKind::ZeroVector,
            QueryError::Vector(VectorError::EmptyIndex) => QueryErrorKind::EmptyIndex,
            QueryError::Embedding(_) => QueryErrorKind::EmbeddingFailure,
        }
    }
}

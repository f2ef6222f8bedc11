//! Vector and index error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by vector arithmetic and index queries
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VectorError {
    #[error("Cannot aggregate an empty set of vectors")]
    EmptyInput,

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Cannot normalize a zero vector")]
    ZeroVector,

    #[error("Index holds no items")]
    EmptyIndex,
}

/// Errors raised while loading an index from its source
#[derive(Error, Debug)]
pub enum IndexLoadError {
    #[error("Failed to read index file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON index: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to decode bincode index: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("Duplicate item identifier: {id}")]
    DuplicateId { id: String },

    #[error("Item '{id}' has dimension {actual}, expected {expected}")]
    DimensionMismatch {
        id: String,
        expected: usize,
        actual: usize,
    },

    #[error("Item '{id}' contains a non-finite component")]
    NonFiniteValue { id: String },

    #[error("Invalid index configuration: {reason}")]
    InvalidConfig { reason: String },
}

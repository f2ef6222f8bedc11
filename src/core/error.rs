//! Startup error types

use thiserror::Error;

use super::config::ConfigError;
use crate::embeddings::EmbeddingError;
use crate::logging::LoggingError;
use crate::server::ServerError;
use crate::search::InvalidScale;
use crate::vector::IndexLoadError;

/// Result type alias for startup operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Anything that keeps the service from starting or serving
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    #[error("Index load error: {0}")]
    IndexLoad(#[from] IndexLoadError),

    #[error("Embedding client error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Query setup error: {0}")]
    Query(#[from] InvalidScale),

    #[error("Server error: {0}")]
    Server(#[from] ServerError),
}

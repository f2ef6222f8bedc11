//! semantic-query - text similarity search over a pre-built vector collection
//!
//! This crate provides:
//! - Word-aligned chunking of query text
//! - Mean pooling and L2 normalization of chunk embeddings
//! - Exact and partitioned nearest-neighbour indexes over stored items
//! - Distance to similarity scoring
//! - An HTTP client for the embedding service and an HTTP query API

pub mod core;
pub mod embeddings;
pub mod logging;
pub mod search;
pub mod server;
pub mod text;
pub mod vector;

// Re-export commonly used items
pub use crate::core::config::AppConfig;
pub use crate::core::error::{AppError, Result};
pub use embeddings::{Embedder, EmbeddingConfig, EmbeddingError, HttpEmbedder};
pub use search::{QueryConfig, QueryError, QueryErrorKind, QueryPipeline, ScoredMatch};
pub use server::{QueryServer, ServerConfig};
pub use text::Chunker;
pub use vector::{FlatIndex, IndexConfig, IndexedItem, IvfIndex, VectorError, VectorIndex};

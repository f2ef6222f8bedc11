//! Embedding capability
//!
//! The query pipeline never computes embeddings itself. It consumes them from
//! an [`Embedder`], which must return a fixed-dimensionality vector for a piece
//! of text. [`HttpEmbedder`] talks to an external embedding service.

mod config;
mod error;
mod http;

#[cfg(test)]
mod tests;

pub use config::EmbeddingConfig;
pub use error::{EmbeddingError, EmbeddingResult};
pub use http::HttpEmbedder;

use async_trait::async_trait;

/// Text-to-vector function supplied by the embedding collaborator
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single piece of text
    async fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>>;

    /// Dimension of every vector this embedder returns
    fn dimension(&self) -> usize;
}

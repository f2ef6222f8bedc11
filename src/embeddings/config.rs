//! Configuration for the embedding client

use serde::{Deserialize, Serialize};

/// Settings for talking to the embedding service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Endpoint accepting `POST {"text": ...}` and answering `{"vector": [...]}`
    pub endpoint: String,

    /// Embedding dimension (384 for paraphrase-multilingual-MiniLM-L12-v2)
    pub dimension: usize,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,

    /// Chunk embeddings in flight per query
    pub max_concurrent_requests: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8000/api/vector".to_string(),
            dimension: 384,
            timeout_ms: 10_000,
            max_concurrent_requests: 4,
        }
    }
}

impl EmbeddingConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

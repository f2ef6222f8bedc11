//! HTTP client for an external embedding service

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::config::EmbeddingConfig;
use super::error::{EmbeddingError, EmbeddingResult};
use super::Embedder;

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    vector: Vec<f32>,
}

/// Embedder backed by a remote service
pub struct HttpEmbedder {
    client: Client,
    config: EmbeddingConfig,
}

impl HttpEmbedder {
    pub fn new(config: EmbeddingConfig) -> EmbeddingResult<Self> {
        if config.dimension == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "dimension must be at least 1".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| EmbeddingError::InvalidConfig {
                reason: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &EmbeddingConfig {
        &self.config
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>> {
        let timeout_ms = self.config.timeout_ms;

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&EmbedRequest { text })
            .send()
            .await
            .map_err(|e| EmbeddingError::from_reqwest(e, timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Embedding service returned {}", status);
            return Err(EmbeddingError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: EmbedResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::from_reqwest(e, timeout_ms))?;

        if payload.vector.len() != self.config.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.config.dimension,
                actual: payload.vector.len(),
            });
        }
        if payload.vector.iter().any(|x| !x.is_finite()) {
            return Err(EmbeddingError::InvalidResponse {
                reason: "vector contains non-finite values".to_string(),
            });
        }

        debug!("Embedded {} bytes of text", text.len());
        Ok(payload.vector)
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }
}

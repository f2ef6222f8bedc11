//! Similarity query pipeline
//!
//! chunk → embed (per chunk, concurrently) → mean-pool → normalize →
//! index search → score. Any failure aborts the whole query.

use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use super::config::QueryConfig;
use super::error::{QueryError, QueryResult};
use super::scorer::{InvalidScale, Scorer};
use crate::embeddings::Embedder;
use crate::text::Chunker;
use crate::vector::{aggregate, normalize, VectorIndex};

/// A ranked hit returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub id: String,
    /// Squared Euclidean distance between the query and the stored vector
    pub distance: f32,
    /// Percentage in `[0, 100]`, two decimals
    pub similarity: f64,
}

/// Owns the embedder and the read-only index for the process lifetime
pub struct QueryPipeline {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    scorer: Scorer,
    config: QueryConfig,
    max_concurrency: usize,
}

impl QueryPipeline {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        config: QueryConfig,
    ) -> Result<Self, InvalidScale> {
        let scorer = Scorer::new(config.similarity_scale)?;
        Ok(Self {
            embedder,
            index,
            scorer,
            config,
            max_concurrency: 4,
        })
    }

    /// Limit the number of chunk embeddings in flight per query
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn index(&self) -> &Arc<dyn VectorIndex> {
        &self.index
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Query with the configured chunk length
    pub async fn query_default(&self, text: &str, k: usize) -> QueryResult<Vec<ScoredMatch>> {
        self.query(text, k, self.config.max_chunk_length).await
    }

    /// Return the `k` stored items most similar to `text`, closest first
    pub async fn query(
        &self,
        text: &str,
        k: usize,
        max_chunk_length: usize,
    ) -> QueryResult<Vec<ScoredMatch>> {
        let span = info_span!("query", query_id = %Uuid::now_v7(), k);

        async move {
            let started = Instant::now();
            self.check_k(k)?;

            let document = self.embed_document(text, max_chunk_length).await?;
            let neighbors = self.index.search(&document, k)?;

            let matches: Vec<ScoredMatch> = neighbors
                .into_iter()
                .map(|neighbor| ScoredMatch {
                    similarity: self.scorer.similarity(neighbor.distance),
                    id: neighbor.id,
                    distance: neighbor.distance,
                })
                .collect();

            info!(
                results = matches.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Query completed"
            );
            Ok(matches)
        }
        .instrument(span)
        .await
    }

    /// Reduce `text` to one unit-norm document vector
    pub async fn embed_document(&self, text: &str, max_chunk_length: usize) -> QueryResult<Vec<f32>> {
        let chunks = Chunker::new(max_chunk_length).chunk(text);
        if chunks.is_empty() {
            return Err(QueryError::EmptyQuery);
        }
        debug!(chunks = chunks.len(), "Chunked query text");

        let vectors = self.embed_chunks(&chunks).await?;
        let pooled = aggregate(&vectors)?;
        Ok(normalize(&pooled)?)
    }

    /// Embed every chunk concurrently, preserving chunk order.
    ///
    /// The first failure aborts the remaining requests.
    async fn embed_chunks(&self, chunks: &[String]) -> QueryResult<Vec<Vec<f32>>> {
        let vectors: Vec<Vec<f32>> = stream::iter(chunks.iter().cloned())
            .map(|chunk| {
                let embedder = Arc::clone(&self.embedder);
                async move { embedder.embed(&chunk).await }
            })
            .buffered(self.max_concurrency)
            .try_collect()
            .await?;
        Ok(vectors)
    }

    /// A `k` above the index size is allowed and returns every item
    fn check_k(&self, k: usize) -> QueryResult<()> {
        if k == 0 {
            return Err(QueryError::InvalidK {
                k,
                max: self.config.max_k,
            });
        }
        Ok(())
    }
}

//! HTTP handlers
//!
//! Request bodies are parsed through `Result<Json<T>, JsonRejection>` so that
//! malformed input gets the same error envelope as query failures.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::search::{QueryError, QueryPipeline, ScoredMatch};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<QueryPipeline>,
}

impl AppState {
    pub fn new(pipeline: Arc<QueryPipeline>) -> Self {
        Self { pipeline }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub text: String,
    /// Falls back to `query.default_k`
    pub k: Option<usize>,
    /// Falls back to `query.max_chunk_length`
    pub max_chunk_length: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<ScoredMatch>,
}

#[derive(Debug, Deserialize)]
pub struct VectorRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VectorResponse {
    pub vector: Vec<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub items: usize,
    pub dimension: usize,
}

/// Rank stored items against the request text
///
/// Route: POST /api/search
pub async fn search(
    State(state): State<AppState>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(request) = body?;
    let config = state.pipeline.config();
    let k = request.k.unwrap_or(config.default_k);
    if k > config.max_k {
        return Err(QueryError::InvalidK {
            k,
            max: config.max_k,
        }
        .into());
    }
    let max_chunk_length = request.max_chunk_length.unwrap_or(config.max_chunk_length);

    let results = state
        .pipeline
        .query(&request.text, k, max_chunk_length)
        .await?;
    Ok(Json(SearchResponse { results }))
}

/// Return the normalized document vector for the request text
///
/// Route: POST /api/vector
pub async fn vector(
    State(state): State<AppState>,
    body: Result<Json<VectorRequest>, JsonRejection>,
) -> Result<Json<VectorResponse>, ApiError> {
    let Json(request) = body?;
    let max_chunk_length = state.pipeline.config().max_chunk_length;

    let vector = state
        .pipeline
        .embed_document(&request.text, max_chunk_length)
        .await?;
    Ok(Json(VectorResponse { vector }))
}

/// Route: GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let index = state.pipeline.index();
    Json(HealthResponse {
        status: "ok".to_string(),
        items: index.len(),
        dimension: index.dimension(),
    })
}

//! Tests for the embedding client

use super::*;
use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;

/// Start a fake embedding service and return its address
async fn spawn_service() -> SocketAddr {
    async fn vector(Json(body): Json<Value>) -> Json<Value> {
        let text = body["text"].as_str().unwrap_or_default();
        Json(json!({ "vector": [text.len() as f32, 1.0, 0.0] }))
    }

    let router = Router::new()
        .route("/api/vector", post(vector))
        .route(
            "/short",
            post(|| async { Json(json!({ "vector": [1.0] })) }),
        )
        .route(
            "/broken",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model crashed") }),
        )
        .route("/garbage", post(|| async { "not json" }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn embedder_for(addr: SocketAddr, path: &str) -> HttpEmbedder {
    let config = EmbeddingConfig::default()
        .with_endpoint(format!("http://{}{}", addr, path))
        .with_dimension(3)
        .with_timeout_ms(2_000);
    HttpEmbedder::new(config).unwrap()
}

#[test]
fn test_default_config() {
    let config = EmbeddingConfig::default();
    assert_eq!(config.dimension, 384);
    assert_eq!(config.max_concurrent_requests, 4);
    assert!(config.endpoint.ends_with("/api/vector"));
}

#[test]
fn test_zero_dimension_rejected() {
    let config = EmbeddingConfig::default().with_dimension(0);
    assert!(matches!(
        HttpEmbedder::new(config),
        Err(EmbeddingError::InvalidConfig { .. })
    ));
}

#[tokio::test]
async fn test_embed_success() {
    let addr = spawn_service().await;
    let embedder = embedder_for(addr, "/api/vector");

    let vector = embedder.embed("hello").await.unwrap();
    assert_eq!(vector, vec![5.0, 1.0, 0.0]);
    assert_eq!(embedder.dimension(), 3);
}

#[tokio::test]
async fn test_embed_wrong_dimension() {
    let addr = spawn_service().await;
    let embedder = embedder_for(addr, "/short");

    match embedder.embed("hello").await {
        Err(EmbeddingError::DimensionMismatch { expected, actual }) => {
            assert_eq!(expected, 3);
            assert_eq!(actual, 1);
        }
        other => panic!("Expected DimensionMismatch, got {:?}", other),
    }
}

#[tokio::test]
async fn test_embed_server_error() {
    let addr = spawn_service().await;
    let embedder = embedder_for(addr, "/broken");

    match embedder.embed("hello").await {
        Err(EmbeddingError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "model crashed");
        }
        other => panic!("Expected Status, got {:?}", other),
    }
}

#[tokio::test]
async fn test_embed_malformed_body() {
    let addr = spawn_service().await;
    let embedder = embedder_for(addr, "/garbage");

    assert!(matches!(
        embedder.embed("hello").await,
        Err(EmbeddingError::InvalidResponse { .. })
    ));
}

#[tokio::test]
async fn test_embed_connection_refused() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let embedder = embedder_for(addr, "/api/vector");
    assert!(matches!(
        embedder.embed("hello").await,
        Err(EmbeddingError::Request { .. })
    ));
}

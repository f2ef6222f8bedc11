//! Tests for the HTTP front end

use super::*;
use crate::embeddings::{Embedder, EmbeddingError, EmbeddingResult};
use crate::search::{QueryConfig, QueryErrorKind};
use crate::vector::{FlatIndex, IndexedItem, VectorIndex};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

struct CompassEmbedder;

#[async_trait]
impl Embedder for CompassEmbedder {
    async fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>> {
        match text {
            "east" => Ok(vec![1.0, 0.0]),
            "west" => Ok(vec![-1.0, 0.0]),
            "north" => Ok(vec![0.0, 1.0]),
            other => Err(EmbeddingError::Status {
                status: 500,
                body: format!("cannot embed '{}'", other),
            }),
        }
    }

    fn dimension(&self) -> usize {
        2
    }
}

fn items() -> Vec<IndexedItem> {
    vec![
        IndexedItem::new("doc1", vec![1.0, 0.0]),
        IndexedItem::new("doc2", vec![0.0, 1.0]),
        IndexedItem::new("doc3", vec![0.7071, 0.7071]),
    ]
}

fn router_with(items: Vec<IndexedItem>) -> Router {
    let index: Arc<dyn VectorIndex> = Arc::new(FlatIndex::new(2, items).unwrap());
    let pipeline =
        QueryPipeline::new(Arc::new(CompassEmbedder), index, QueryConfig::default()).unwrap();
    QueryServer::new(ServerConfig::default(), Arc::new(pipeline)).build_router()
}

fn router() -> Router {
    router_with(items())
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_reports_index_shape() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(router(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "items": 3, "dimension": 2}));
}

#[tokio::test]
async fn test_search_returns_ranked_results() {
    let (status, body) = send(
        router(),
        post_json("/api/search", json!({"text": "east", "k": 2})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["id"], "doc1");
    assert_eq!(results[0]["similarity"], 100.0);
    assert_eq!(results[1]["id"], "doc3");
    let similarity = results[1]["similarity"].as_f64().unwrap();
    assert!((similarity - 70.71).abs() < 0.01);
}

#[tokio::test]
async fn test_search_defaults_k() {
    let (status, body) = send(router(), post_json("/api/search", json!({"text": "north"}))).await;

    assert_eq!(status, StatusCode::OK);
    // default_k is 5 but only three items are stored
    assert_eq!(body["results"].as_array().unwrap().len(), 3);
    assert_eq!(body["results"][0]["id"], "doc2");
}

#[tokio::test]
async fn test_vector_endpoint() {
    let (status, body) = send(router(), post_json("/api/vector", json!({"text": "east"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"vector": [1.0, 0.0]}));
}

#[tokio::test]
async fn test_empty_query_is_bad_request() {
    let (status, body) = send(router(), post_json("/api/search", json!({"text": "   "}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "EmptyQuery");
    assert!(body["message"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn test_invalid_k_is_bad_request() {
    let (status, body) = send(
        router(),
        post_json("/api/search", json!({"text": "east", "k": 0})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidRequest");
}

#[tokio::test]
async fn test_k_above_limit_is_bad_request() {
    let (status, body) = send(
        router(),
        post_json("/api/search", json!({"text": "east", "k": 101})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidRequest");
    assert!(body["message"].as_str().unwrap().contains("101"));

    let (status, body) = send(
        router(),
        post_json("/api/search", json!({"text": "east", "k": 100})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_zero_vector_is_unprocessable() {
    let (status, body) = send(
        router(),
        post_json(
            "/api/search",
            json!({"text": "east west", "max_chunk_length": 5}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "ZeroVector");
}

#[tokio::test]
async fn test_empty_index_is_unavailable() {
    let (status, body) = send(
        router_with(Vec::new()),
        post_json("/api/search", json!({"text": "east"})),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "EmptyIndex");
}

#[tokio::test]
async fn test_embedding_failure_is_bad_gateway() {
    let (status, body) = send(
        router(),
        post_json("/api/vector", json!({"text": "south"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "EmbeddingFailure");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"text\": "))
        .unwrap();
    let (status, body) = send(router(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidRequest");
}

#[test]
fn test_status_mapping() {
    assert_eq!(status_for(QueryErrorKind::EmptyQuery), StatusCode::BAD_REQUEST);
    assert_eq!(status_for(QueryErrorKind::EmptyInput), StatusCode::BAD_REQUEST);
    assert_eq!(
        status_for(QueryErrorKind::DimensionMismatch),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        status_for(QueryErrorKind::InvalidRequest),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        status_for(QueryErrorKind::ZeroVector),
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(
        status_for(QueryErrorKind::EmptyIndex),
        StatusCode::SERVICE_UNAVAILABLE
    );
    assert_eq!(
        status_for(QueryErrorKind::EmbeddingFailure),
        StatusCode::BAD_GATEWAY
    );
}

#[test]
fn test_server_config_address() {
    let config = ServerConfig::default();
    assert_eq!(config.bind_addr().unwrap(), "127.0.0.1:8080");

    let config = ServerConfig {
        host: "localhost".to_string(),
        port: 9000,
        ..ServerConfig::default()
    };
    assert_eq!(config.bind_addr().unwrap(), "localhost:9000");

    let config = ServerConfig {
        host: "not a host".to_string(),
        ..ServerConfig::default()
    };
    assert!(matches!(
        config.bind_addr(),
        Err(ServerError::InvalidAddress { .. })
    ));
}

#[tokio::test]
async fn test_serve_on_bound_listener() {
    let index: Arc<dyn VectorIndex> = Arc::new(FlatIndex::new(2, items()).unwrap());
    let pipeline =
        QueryPipeline::new(Arc::new(CompassEmbedder), index, QueryConfig::default()).unwrap();
    let server = QueryServer::new(ServerConfig::default(), Arc::new(pipeline));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { server.serve(listener).await });

    let body: Value = reqwest::get(format!("http://{}/health", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["items"], 3);
}

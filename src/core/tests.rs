//! Tests for configuration loading

use super::*;
use crate::logging::{LogFormat, LogLevel};
use crate::vector::{IndexFormat, IndexKind};
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_default_config_is_valid() {
    let config = AppConfig::default();
    config.validate().unwrap();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.embedding.dimension, 384);
    assert_eq!(config.query.default_k, 5);
    assert_eq!(config.index.kind, IndexKind::Flat);
}

#[tokio::test]
async fn test_load_partial_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
            "server": {"port": 9000},
            "embedding": {"endpoint": "http://embedder:8000/api/vector", "dimension": 2},
            "index": {"path": "items.bin", "kind": "ivf", "ivf": {"nlist": 4, "nprobe": 2}},
            "query": {"default_k": 3},
            "logging": {"level": "debug", "format": "json"}
        }"#,
    )
    .unwrap();

    let config = AppConfig::load(&path).await.unwrap();

    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.embedding.dimension, 2);
    assert_eq!(config.embedding.timeout_ms, 10_000);
    assert_eq!(config.index.path, PathBuf::from("items.bin"));
    assert_eq!(config.index.kind, IndexKind::Ivf);
    assert_eq!(config.index.format, IndexFormat::Auto);
    assert_eq!(config.index.ivf.nlist, 4);
    assert_eq!(config.index.ivf.nprobe, 2);
    assert_eq!(config.index.ivf.seed, 42);
    assert_eq!(config.query.default_k, 3);
    assert_eq!(config.query.max_k, 100);
    assert_eq!(config.logging.level, LogLevel::Debug);
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[tokio::test]
async fn test_load_empty_object_gives_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, "{}").unwrap();

    let config = AppConfig::load(&path).await.unwrap();
    assert_eq!(config.server.port, AppConfig::default().server.port);
}

#[tokio::test]
async fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.json");

    assert!(matches!(
        AppConfig::load(&path).await,
        Err(ConfigError::NotFound(_))
    ));

    let config = AppConfig::load_or_default(&path).await.unwrap();
    assert_eq!(config.query.max_k, 100);
}

#[tokio::test]
async fn test_load_malformed_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        AppConfig::load(&path).await,
        Err(ConfigError::Json(_))
    ));
    // Only a missing file falls back to defaults
    assert!(AppConfig::load_or_default(&path).await.is_err());
}

#[tokio::test]
async fn test_load_rejects_invalid_values() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, r#"{"query": {"default_k": 0}}"#).unwrap();

    match AppConfig::load(&path).await {
        Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "query.default_k"),
        other => panic!("expected invalid config, got {:?}", other),
    }
}

#[tokio::test]
async fn test_save_then_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.json");

    let mut config = AppConfig::default();
    config.server.port = 9100;
    config.embedding.dimension = 8;
    config.save(&path).await.unwrap();

    let loaded = AppConfig::load(&path).await.unwrap();
    assert_eq!(loaded.server.port, 9100);
    assert_eq!(loaded.embedding.dimension, 8);
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn test_validate_field_errors() {
    let cases: Vec<(&str, Box<dyn Fn(&mut AppConfig)>)> = vec![
        ("server", Box::new(|c: &mut AppConfig| c.server.host = "bad host".to_string())),
        ("embedding.endpoint", Box::new(|c: &mut AppConfig| c.embedding.endpoint = " ".to_string())),
        ("embedding.dimension", Box::new(|c: &mut AppConfig| c.embedding.dimension = 0)),
        ("embedding.timeout_ms", Box::new(|c: &mut AppConfig| c.embedding.timeout_ms = 0)),
        (
            "embedding.max_concurrent_requests",
            Box::new(|c: &mut AppConfig| c.embedding.max_concurrent_requests = 0),
        ),
        ("index.dimension", Box::new(|c: &mut AppConfig| c.index.dimension = Some(3))),
        ("index.ivf.nlist", Box::new(|c: &mut AppConfig| c.index.ivf.nlist = 0)),
        ("index.ivf.nprobe", Box::new(|c: &mut AppConfig| c.index.ivf.nprobe = 0)),
        ("query.max_k", Box::new(|c: &mut AppConfig| {
            c.query.max_k = 0;
            c.query.default_k = 0;
        })),
        ("query.default_k", Box::new(|c: &mut AppConfig| c.query.default_k = 101)),
        ("query.max_chunk_length", Box::new(|c: &mut AppConfig| c.query.max_chunk_length = 0)),
        ("query.similarity_scale", Box::new(|c: &mut AppConfig| c.query.similarity_scale = -2.0)),
    ];

    for (expected, mutate) in cases {
        let mut config = AppConfig::default();
        mutate(&mut config);
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
            other => panic!("{}: expected invalid config, got {:?}", expected, other),
        }
    }
}

#[test]
fn test_index_config_inherits_embedding_dimension() {
    let mut config = AppConfig::default();
    config.embedding.dimension = 16;
    assert_eq!(config.index_config().dimension, Some(16));

    config.index.dimension = Some(16);
    assert_eq!(config.index_config().dimension, Some(16));
}

#[test]
fn test_resolve_config_path() {
    assert_eq!(
        resolve_config_path(Some("a.json".into()), Some("b.json".into())),
        PathBuf::from("a.json")
    );
    assert_eq!(
        resolve_config_path(None, Some("b.json".into())),
        PathBuf::from("b.json")
    );
    assert_eq!(resolve_config_path(None, None), default_config_path());
    assert!(default_config_path().ends_with("config.json"));
}

#[test]
fn test_app_error_from_config() {
    let err: AppError = ConfigError::NotFound(PathBuf::from("x.json")).into();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[tokio::test]
async fn test_build_server_reports_missing_index() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = AppConfig::default();
    config.index.path = temp_dir.path().join("missing.json");

    match build_server(&config).await {
        Err(AppError::IndexLoad(_)) => {}
        Err(other) => panic!("expected index load error, got {}", other),
        Ok(_) => panic!("expected index load error"),
    }
}

#[tokio::test]
async fn test_build_server_from_index_file() {
    let temp_dir = TempDir::new().unwrap();
    let index_path = temp_dir.path().join("items.json");
    std::fs::write(
        &index_path,
        r#"[{"id": "a", "vector": [1.0, 0.0]}, {"id": "b", "vector": [0.0, 1.0]}]"#,
    )
    .unwrap();

    let mut config = AppConfig::default();
    config.embedding.dimension = 2;
    config.index.path = index_path;
    config.server.port = 9200;

    let server = build_server(&config).await.unwrap();
    assert_eq!(server.config().port, 9200);
}

#[tokio::test]
async fn test_build_server_rejects_dimension_disagreement() {
    let temp_dir = TempDir::new().unwrap();
    let index_path = temp_dir.path().join("items.json");
    std::fs::write(&index_path, r#"[{"id": "a", "vector": [1.0, 0.0, 0.0]}]"#).unwrap();

    let mut config = AppConfig::default();
    config.embedding.dimension = 2;
    config.index.path = index_path;

    assert!(matches!(
        build_server(&config).await,
        Err(AppError::IndexLoad(_))
    ));
}

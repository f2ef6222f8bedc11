//! Application configuration
//!
//! One JSON file with a section per subsystem. Every section falls back to its
//! defaults, so a partial file (or `{}`) is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::embeddings::EmbeddingConfig;
use crate::logging::LoggingConfig;
use crate::search::QueryConfig;
use crate::server::ServerConfig;
use crate::vector::IndexConfig;

/// Environment variable naming the configuration file
pub const CONFIG_ENV_VAR: &str = "SEMANTIC_QUERY_CONFIG";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration file not found: {0:?}")]
    NotFound(PathBuf),

    #[error("Invalid configuration: {field}: {reason}")]
    Invalid { field: String, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub embedding: EmbeddingConfig,
    pub index: IndexConfig,
    pub query: QueryConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Read and validate a configuration file
    pub async fn load(path: &Path) -> ConfigResult<Self> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: AppConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`AppConfig::load`], but a missing file yields the defaults
    pub async fn load_or_default(path: &Path) -> ConfigResult<Self> {
        match Self::load(path).await {
            Err(ConfigError::NotFound(path)) => {
                tracing::warn!("Config file {:?} not found, using defaults", path);
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Write the configuration as pretty JSON (temp file + rename)
    pub async fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let temp_path = path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, &content).await.map_err(io_err)?;
        tokio::fs::rename(&temp_path, path).await.map_err(io_err)?;
        Ok(())
    }

    /// Check cross-field constraints serde cannot express
    pub fn validate(&self) -> ConfigResult<()> {
        self.server.bind_addr().map_err(|e| invalid("server", e))?;

        let embedding = &self.embedding;
        if embedding.endpoint.trim().is_empty() {
            return Err(invalid("embedding.endpoint", "must not be empty"));
        }
        if embedding.dimension == 0 {
            return Err(invalid("embedding.dimension", "must be positive"));
        }
        if embedding.timeout_ms == 0 {
            return Err(invalid("embedding.timeout_ms", "must be positive"));
        }
        if embedding.max_concurrent_requests == 0 {
            return Err(invalid("embedding.max_concurrent_requests", "must be positive"));
        }

        if let Some(dimension) = self.index.dimension {
            if dimension != embedding.dimension {
                return Err(invalid(
                    "index.dimension",
                    format!(
                        "{} does not match embedding.dimension {}",
                        dimension, embedding.dimension
                    ),
                ));
            }
        }
        if self.index.ivf.nlist == 0 {
            return Err(invalid("index.ivf.nlist", "must be positive"));
        }
        if self.index.ivf.nprobe == 0 {
            return Err(invalid("index.ivf.nprobe", "must be positive"));
        }

        let query = &self.query;
        if query.max_k == 0 {
            return Err(invalid("query.max_k", "must be positive"));
        }
        if query.default_k == 0 || query.default_k > query.max_k {
            return Err(invalid(
                "query.default_k",
                format!("must be between 1 and max_k ({})", query.max_k),
            ));
        }
        if query.max_chunk_length == 0 {
            return Err(invalid("query.max_chunk_length", "must be positive"));
        }
        if !query.similarity_scale.is_finite() || query.similarity_scale <= 0.0 {
            return Err(invalid("query.similarity_scale", "must be positive and finite"));
        }

        Ok(())
    }

    /// Index settings with the dimension pinned to the embedder's
    pub fn index_config(&self) -> IndexConfig {
        let mut index = self.index.clone();
        index.dimension = index.dimension.or(Some(self.embedding.dimension));
        index
    }
}

fn invalid(field: &str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// Pick the configuration file: first CLI argument, then
/// `SEMANTIC_QUERY_CONFIG`, then the platform config directory
pub fn resolve_config_path(arg: Option<String>, env: Option<String>) -> PathBuf {
    arg.or(env)
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// `<config dir>/semantic-query/config.json`, or `./config.json`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("semantic-query"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("config.json")
}

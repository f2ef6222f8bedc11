//! HTTP front end for the query pipeline
//!
//! Exposes:
//! - `POST /api/search` ranked matches for a piece of text
//! - `POST /api/vector` the normalized document vector for a piece of text
//! - `GET /health` index size and dimension

mod error;
mod routes;

#[cfg(test)]
mod tests;

pub use error::{status_for, ApiError, ServerError};
pub use routes::{
    AppState, HealthResponse, SearchRequest, SearchResponse, VectorRequest, VectorResponse,
};

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::search::QueryPipeline;

/// Default listen port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS; empty allows any origin
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_SERVER_PORT,
            allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// `host:port`; the host may be a name or an IP literal
    pub fn bind_addr(&self) -> Result<String, ServerError> {
        let host = self.host.trim();
        let addr = format!("{}:{}", host, self.port);
        if host.is_empty() || host.contains(char::is_whitespace) {
            return Err(ServerError::InvalidAddress { addr });
        }
        Ok(addr)
    }
}

/// Serves the query pipeline over HTTP
pub struct QueryServer {
    config: ServerConfig,
    state: AppState,
}

impl QueryServer {
    pub fn new(config: ServerConfig, pipeline: Arc<QueryPipeline>) -> Self {
        Self {
            config,
            state: AppState::new(pipeline),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router with all routes and middleware
    pub fn build_router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
        let cors = if self.config.allowed_origins.is_empty() {
            cors.allow_origin(Any)
        } else {
            cors.allow_origin(
                self.config
                    .allowed_origins
                    .iter()
                    .filter_map(|o| o.parse::<HeaderValue>().ok())
                    .collect::<Vec<_>>(),
            )
        };

        Router::new()
            .route("/api/search", post(routes::search))
            .route("/api/vector", post(routes::vector))
            .route("/health", get(routes::health))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(self.state.clone())
    }

    /// Bind the configured address and serve until Ctrl-C
    pub async fn start(&self) -> Result<(), ServerError> {
        let addr = self.config.bind_addr()?;
        let listener = TcpListener::bind(addr.as_str())
            .await
            .map_err(|e| ServerError::BindFailed {
                addr,
                reason: e.to_string(),
            })?;

        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(&self, listener: TcpListener) -> Result<(), ServerError> {
        let index = self.state.pipeline.index();
        tracing::info!(
            addr = %listener.local_addr()?,
            items = index.len(),
            dimension = index.dimension(),
            "Query server listening"
        );

        axum::serve(listener, self.build_router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Query server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

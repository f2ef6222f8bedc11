//! Service assembly

use std::sync::Arc;

use super::config::AppConfig;
use super::error::Result;
use crate::embeddings::HttpEmbedder;
use crate::search::QueryPipeline;
use crate::server::QueryServer;
use crate::vector::load_index;

/// Load the index and wire the embedder, pipeline and server together
pub async fn build_server(config: &AppConfig) -> Result<QueryServer> {
    let index = load_index(&config.index_config()).await?;
    tracing::info!(
        items = index.len(),
        dimension = index.dimension(),
        kind = ?config.index.kind,
        "Index loaded"
    );

    let embedder = HttpEmbedder::new(config.embedding.clone())?;
    let pipeline = QueryPipeline::new(Arc::new(embedder), index, config.query.clone())?
        .with_max_concurrency(config.embedding.max_concurrent_requests);

    Ok(QueryServer::new(config.server.clone(), Arc::new(pipeline)))
}

/// Build the service and serve until shutdown
pub async fn run(config: &AppConfig) -> Result<()> {
    let server = build_server(config).await?;
    server.start().await?;
    Ok(())
}

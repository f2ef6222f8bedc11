//! Index loading
//!
//! Reads a pre-built item list, validates it and wraps it in the configured
//! search structure. This is the only place an index is ever written.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use super::config::{IndexConfig, IndexFormat, IndexKind};
use super::error::{IndexLoadError, VectorError};
use super::index::{FlatIndex, IndexedItem, VectorIndex};
use super::ivf::IvfIndex;

/// Result type for loader operations
pub type LoadResult<T> = Result<T, IndexLoadError>;

/// Load the index described by `config`
pub async fn load_index(config: &IndexConfig) -> LoadResult<Arc<dyn VectorIndex>> {
    let items = read_items(&config.path, config.format).await?;
    build_index(config, items)
}

/// Read and decode the raw item list
pub async fn read_items(path: &Path, format: IndexFormat) -> LoadResult<Vec<IndexedItem>> {
    let bytes = tokio::fs::read(path).await.map_err(|source| IndexLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let format = format.resolve(path);
    debug!("Decoding {} bytes from {:?} as {:?}", bytes.len(), path, format);

    let items = match format {
        IndexFormat::Bincode => bincode::deserialize(&bytes)?,
        IndexFormat::Json | IndexFormat::Auto => serde_json::from_slice(&bytes)?,
    };
    Ok(items)
}

/// Validate items and build the configured index
pub fn build_index(config: &IndexConfig, items: Vec<IndexedItem>) -> LoadResult<Arc<dyn VectorIndex>> {
    let dimension = validate_items(&items, config.dimension)?;

    let index: Arc<dyn VectorIndex> = match config.kind {
        IndexKind::Flat => Arc::new(FlatIndex::new(dimension, items).map_err(invalid)?),
        IndexKind::Ivf => {
            if config.ivf.nlist == 0 {
                return Err(IndexLoadError::InvalidConfig {
                    reason: "ivf.nlist must be at least 1".to_string(),
                });
            }
            Arc::new(IvfIndex::new(dimension, items, &config.ivf).map_err(invalid)?)
        }
    };

    info!(
        "Loaded {:?} index with {} items of dimension {}",
        config.kind,
        index.len(),
        index.dimension()
    );
    Ok(index)
}

/// Check dimensions, identifier uniqueness and finiteness.
///
/// Returns the shared dimensionality. An empty list is valid only when the
/// dimension is configured, since it cannot be inferred.
pub fn validate_items(items: &[IndexedItem], expected: Option<usize>) -> LoadResult<usize> {
    let dimension = match (expected, items.first()) {
        (Some(dimension), _) => dimension,
        (None, Some(first)) => first.vector.len(),
        (None, None) => {
            return Err(IndexLoadError::InvalidConfig {
                reason: "cannot infer dimension from an empty index".to_string(),
            })
        }
    };

    if dimension == 0 {
        return Err(IndexLoadError::InvalidConfig {
            reason: "dimension must be at least 1".to_string(),
        });
    }

    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if item.vector.len() != dimension {
            return Err(IndexLoadError::DimensionMismatch {
                id: item.id.clone(),
                expected: dimension,
                actual: item.vector.len(),
            });
        }
        if item.vector.iter().any(|x| !x.is_finite()) {
            return Err(IndexLoadError::NonFiniteValue { id: item.id.clone() });
        }
        if !seen.insert(item.id.as_str()) {
            return Err(IndexLoadError::DuplicateId { id: item.id.clone() });
        }
    }

    Ok(dimension)
}

fn invalid(err: VectorError) -> IndexLoadError {
    IndexLoadError::InvalidConfig {
        reason: err.to_string(),
    }
}

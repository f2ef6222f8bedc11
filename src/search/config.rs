//! Query settings

use serde::{Deserialize, Serialize};

use super::scorer::DEFAULT_SIMILARITY_SCALE;
use crate::text::DEFAULT_MAX_CHUNK_LENGTH;

/// Per-query defaults and limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Results returned when the caller does not ask for a count
    pub default_k: usize,

    /// Largest accepted result count
    pub max_k: usize,

    /// Chunk limit in bytes used when the caller does not provide one
    pub max_chunk_length: usize,

    /// Distance at which similarity reaches 0%
    pub similarity_scale: f64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_k: 5,
            max_k: 100,
            max_chunk_length: DEFAULT_MAX_CHUNK_LENGTH,
            similarity_scale: DEFAULT_SIMILARITY_SCALE,
        }
    }
}

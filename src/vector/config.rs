//! Index configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk encoding of the item list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IndexFormat {
    /// Pick by file extension: `.bin`/`.bincode` is bincode, anything else JSON
    #[default]
    Auto,
    /// JSON array of `{"id": ..., "vector": [...]}`
    Json,
    /// bincode-encoded `Vec<IndexedItem>`
    Bincode,
}

impl IndexFormat {
    /// Resolve `Auto` against a concrete path
    pub fn resolve(self, path: &Path) -> IndexFormat {
        match self {
            IndexFormat::Auto => {
                let extension = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|s| s.to_lowercase())
                    .unwrap_or_default();
                match extension.as_str() {
                    "bin" | "bincode" => IndexFormat::Bincode,
                    _ => IndexFormat::Json,
                }
            }
            other => other,
        }
    }
}

/// Search structure built over the loaded items
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    /// Exact linear scan
    #[default]
    Flat,
    /// Partitioned approximate search
    Ivf,
}

/// IVF partitioning parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IvfConfig {
    /// Number of partitions (capped at the item count)
    pub nlist: usize,
    /// Partitions scanned per query
    /// Higher values = better recall, slower queries
    pub nprobe: usize,
    /// k-means iterations used to train centroids
    pub iterations: usize,
    /// Seed for centroid initialisation
    pub seed: u64,
}

impl Default for IvfConfig {
    fn default() -> Self {
        Self {
            nlist: 64,
            nprobe: 8,
            iterations: 20,
            seed: 42,
        }
    }
}

/// Main configuration for the index loader
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Path to the item file
    pub path: PathBuf,

    /// Encoding of the item file
    pub format: IndexFormat,

    /// Search structure to build
    pub kind: IndexKind,

    /// Expected dimensionality; inferred from the first item when unset
    pub dimension: Option<usize>,

    /// Parameters for `IndexKind::Ivf`
    pub ivf: IvfConfig,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/index.json"),
            format: IndexFormat::Auto,
            kind: IndexKind::Flat,
            dimension: None,
            ivf: IvfConfig::default(),
        }
    }
}

impl IndexConfig {
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_format(mut self, format: IndexFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_kind(mut self, kind: IndexKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }

    pub fn with_ivf(mut self, ivf: IvfConfig) -> Self {
        self.ivf = ivf;
        self
    }
}

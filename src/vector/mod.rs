//! Vector arithmetic and nearest-neighbour indexes
//!
//! This module provides:
//! - Mean pooling and L2 normalization of embeddings
//! - An exact linear-scan index and a partitioned (IVF) approximate index
//! - Loading a pre-built item list from JSON or bincode files

mod config;
mod error;
mod index;
mod ivf;
mod loader;
pub mod math;


pub use config::{IndexConfig, IndexFormat, IndexKind, IvfConfig};
pub use error::{IndexLoadError, VectorError};
pub use index::{FlatIndex, IndexedItem, Neighbor, VectorIndex};
pub use ivf::IvfIndex;
pub use loader::{build_index, load_index, read_items, validate_items, LoadResult};
pub use math::{aggregate, normalize};

/// A dense embedding
pub type Vector = Vec<f32>;

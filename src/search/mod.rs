//! Similarity search
//!
//! This module provides:
//! - The query pipeline turning text into ranked stored items
//! - Distance to similarity scoring
//! - The query error taxonomy

mod config;
mod error;
mod pipeline;
mod scorer;


pub use config::QueryConfig;
pub use error::{QueryError, QueryErrorKind, QueryResult};
pub use pipeline::{QueryPipeline, ScoredMatch};
pub use scorer::{similarity, InvalidScale, Scorer, DEFAULT_SIMILARITY_SCALE};

//! Text preprocessing for embedding

pub mod chunker;


pub use chunker::{chunk, Chunker, DEFAULT_MAX_CHUNK_LENGTH};

//! Word-aligned text chunking
//!
//! Splits long text into segments no longer than a byte limit so each segment
//! fits the embedding model's input window.

/// Default chunk limit in bytes
pub const DEFAULT_MAX_CHUNK_LENGTH: usize = 512;

/// Greedy whitespace chunker
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    max_length: usize,
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHUNK_LENGTH)
    }
}

impl Chunker {
    /// Create a chunker; a zero limit is treated as 1
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length: max_length.max(1),
        }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Split `text` into word-aligned chunks.
    ///
    /// Text that fits within the limit comes back as a single trimmed chunk.
    /// Empty or all-whitespace input yields no chunks. A word longer than the
    /// limit is never cut and becomes its own oversized chunk.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        if trimmed.len() <= self.max_length {
            return vec![trimmed.to_string()];
        }

        let mut chunks = Vec::new();
        let mut current = String::new();

        for word in trimmed.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
            } else if current.len() + 1 + word.len() <= self.max_length {
                current.push(' ');
                current.push_str(word);
            } else {
                chunks.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }

        if !current.is_empty() {
            chunks.push(current);
        }

        chunks
    }
}

/// Convenience wrapper around [`Chunker::chunk`]
pub fn chunk(text: &str, max_length: usize) -> Vec<String> {
    Chunker::new(max_length).chunk(text)
}

//! Read-only nearest-neighbour indexes
//!
//! Every index is built once and then only searched. Implementations hold no
//! interior mutability, so a shared `Arc<dyn VectorIndex>` can serve any
//! number of concurrent queries without locking.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use super::error::VectorError;
use super::math::{ensure_dimension, squared_euclidean};

/// An (identifier, vector) pair stored in an index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedItem {
    /// Unique identifier within one index
    pub id: String,
    /// Embedding of the stored document
    pub vector: Vec<f32>,
}

impl IndexedItem {
    pub fn new(id: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            vector,
        }
    }
}

/// One search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub id: String,
    /// Squared Euclidean distance to the query
    pub distance: f32,
}

impl Eq for Neighbor {}

impl PartialOrd for Neighbor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Neighbor {
    /// Ascending distance, ties broken by identifier
    fn cmp(&self, other: &Self) -> Ordering {
        compare_hits(self.distance, &self.id, other.distance, &other.id)
    }
}

#[inline]
fn compare_hits(a_distance: f32, a_id: &str, b_distance: f32, b_id: &str) -> Ordering {
    a_distance.total_cmp(&b_distance).then_with(|| a_id.cmp(b_id))
}

/// Query contract shared by all index implementations.
///
/// `search` returns at most `k` neighbours ordered by ascending distance with
/// ties broken by ascending identifier. It fails with
/// [`VectorError::DimensionMismatch`] for a query of the wrong length and with
/// [`VectorError::EmptyIndex`] when the index is empty and `k > 0`.
pub trait VectorIndex: Send + Sync {
    /// Dimensionality shared by every stored vector
    fn dimension(&self) -> usize;

    /// Number of stored items
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>, VectorError>;
}

/// Shared argument checks for [`VectorIndex::search`].
///
/// Returns `Ok(false)` when the search can short-circuit with no results.
pub(crate) fn check_query(
    index: &dyn VectorIndex,
    query: &[f32],
    k: usize,
) -> Result<bool, VectorError> {
    ensure_dimension(query, index.dimension())?;
    if k == 0 {
        return Ok(false);
    }
    if index.is_empty() {
        return Err(VectorError::EmptyIndex);
    }
    Ok(true)
}

/// Bounded max-heap keeping the `k` best hits seen so far
pub(crate) struct TopK {
    k: usize,
    heap: BinaryHeap<Neighbor>,
}

impl TopK {
    /// `len` is the number of candidates; it caps the preallocation
    pub(crate) fn new(k: usize, len: usize) -> Self {
        Self {
            k,
            heap: BinaryHeap::with_capacity(k.min(len).saturating_add(1)),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    /// Offer a candidate; the identifier is only cloned if the hit is kept
    pub(crate) fn offer(&mut self, id: &str, distance: f32) {
        if self.heap.len() < self.k {
            self.heap.push(Neighbor {
                id: id.to_string(),
                distance,
            });
            return;
        }

        let replace = match self.heap.peek() {
            Some(worst) => {
                compare_hits(distance, id, worst.distance, &worst.id) == Ordering::Less
            }
            None => false,
        };

        if replace {
            self.heap.pop();
            self.heap.push(Neighbor {
                id: id.to_string(),
                distance,
            });
        }
    }

    /// Hits in ascending (distance, id) order
    pub(crate) fn into_sorted(self) -> Vec<Neighbor> {
        self.heap.into_sorted_vec()
    }
}

/// Exact index: a linear scan over contiguous vector storage
#[derive(Debug, Clone)]
pub struct FlatIndex {
    dimension: usize,
    ids: Vec<String>,
    /// Row-major `len * dimension` values
    data: Vec<f32>,
}

impl FlatIndex {
    /// Build from items that already passed loader validation.
    ///
    /// Items whose length differs from `dimension` are rejected rather than
    /// truncated or padded.
    pub fn new(dimension: usize, items: Vec<IndexedItem>) -> Result<Self, VectorError> {
        let mut ids = Vec::with_capacity(items.len());
        let mut data = Vec::with_capacity(items.len() * dimension);

        for item in items {
            ensure_dimension(&item.vector, dimension)?;
            ids.push(item.id);
            data.extend_from_slice(&item.vector);
        }

        Ok(Self {
            dimension,
            ids,
            data,
        })
    }

    /// Stored vector at a row position
    pub(crate) fn row(&self, position: usize) -> &[f32] {
        let start = position * self.dimension;
        &self.data[start..start + self.dimension]
    }

    pub(crate) fn id(&self, position: usize) -> &str {
        &self.ids[position]
    }

    /// Iterate stored items in load order
    pub fn items(&self) -> impl Iterator<Item = (&str, &[f32])> + '_ {
        self.ids
            .iter()
            .enumerate()
            .map(move |(position, id)| (id.as_str(), self.row(position)))
    }
}

impl VectorIndex for FlatIndex {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn len(&self) -> usize {
        self.ids.len()
    }

    fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>, VectorError> {
        if !check_query(self, query, k)? {
            return Ok(Vec::new());
        }

        let mut top = TopK::new(k, self.ids.len());
        for position in 0..self.ids.len() {
            let distance = squared_euclidean(query, self.row(position));
            top.offer(self.id(position), distance);
        }

        Ok(top.into_sorted())
    }
}

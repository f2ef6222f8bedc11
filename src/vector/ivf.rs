//! Inverted-file (IVF) index
//!
//! Vectors are partitioned by their nearest centroid. A query only scans the
//! `nprobe` partitions whose centroids are closest, which trades recall for
//! fewer distance computations. With `nprobe >= nlist` every partition is
//! scanned and results match [`FlatIndex`] exactly.
//!
//! Centroids are trained once at construction with a seeded k-means, so the
//! same items and configuration always produce the same partitions.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use super::config::IvfConfig;
use super::error::VectorError;
use super::index::{check_query, FlatIndex, IndexedItem, Neighbor, TopK, VectorIndex};
use super::math::squared_euclidean;

/// Partitioned approximate index
#[derive(Debug, Clone)]
pub struct IvfIndex {
    storage: FlatIndex,
    /// Row-major `nlist * dimension` centroid values
    centroids: Vec<f32>,
    /// Row positions of the items assigned to each centroid
    lists: Vec<Vec<usize>>,
    nprobe: usize,
}

impl IvfIndex {
    pub fn new(
        dimension: usize,
        items: Vec<IndexedItem>,
        config: &IvfConfig,
    ) -> Result<Self, VectorError> {
        let storage = FlatIndex::new(dimension, items)?;
        let count = storage.len();
        let nlist = config.nlist.min(count).max(1);

        let mut centroids = Self::initial_centroids(&storage, nlist, config.seed);
        let mut assignment = vec![0usize; count];

        if count > 0 {
            for iteration in 0..config.iterations.max(1) {
                let changed = Self::assign(&storage, &centroids, nlist, &mut assignment);
                Self::update_centroids(&storage, &assignment, nlist, &mut centroids);
                if changed == 0 && iteration > 0 {
                    break;
                }
            }
            Self::assign(&storage, &centroids, nlist, &mut assignment);
        }

        let mut lists = vec![Vec::new(); nlist];
        for (position, list) in assignment.iter().enumerate().take(count) {
            lists[*list].push(position);
        }

        debug!(
            "Built IVF index: {} items, {} lists, nprobe {}",
            count, nlist, config.nprobe
        );

        Ok(Self {
            storage,
            centroids,
            lists,
            nprobe: config.nprobe.max(1),
        })
    }

    /// Number of partitions
    pub fn nlist(&self) -> usize {
        self.lists.len()
    }

    pub fn nprobe(&self) -> usize {
        self.nprobe
    }

    fn centroid(&self, list: usize) -> &[f32] {
        let dimension = self.storage.dimension();
        &self.centroids[list * dimension..(list + 1) * dimension]
    }

    /// Pick `nlist` distinct items as starting centroids
    fn initial_centroids(storage: &FlatIndex, nlist: usize, seed: u64) -> Vec<f32> {
        let dimension = storage.dimension();
        if storage.is_empty() {
            return vec![0.0; nlist * dimension];
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut picks = rand::seq::index::sample(&mut rng, storage.len(), nlist).into_vec();
        picks.sort_unstable();

        let mut centroids = Vec::with_capacity(nlist * dimension);
        for position in picks {
            centroids.extend_from_slice(storage.row(position));
        }
        centroids
    }

    /// Assign every item to its nearest centroid; returns how many moved
    fn assign(
        storage: &FlatIndex,
        centroids: &[f32],
        nlist: usize,
        assignment: &mut [usize],
    ) -> usize {
        let dimension = storage.dimension();
        let mut changed = 0;

        for (position, slot) in assignment.iter_mut().enumerate() {
            let row = storage.row(position);
            let mut best = 0;
            let mut best_distance = f32::INFINITY;
            for list in 0..nlist {
                let centroid = &centroids[list * dimension..(list + 1) * dimension];
                let distance = squared_euclidean(row, centroid);
                if distance < best_distance {
                    best = list;
                    best_distance = distance;
                }
            }
            if *slot != best {
                *slot = best;
                changed += 1;
            }
        }

        changed
    }

    /// Move each centroid to the mean of its members; empty lists keep theirs
    fn update_centroids(
        storage: &FlatIndex,
        assignment: &[usize],
        nlist: usize,
        centroids: &mut [f32],
    ) {
        let dimension = storage.dimension();
        let mut sums = vec![0.0f64; nlist * dimension];
        let mut counts = vec![0usize; nlist];

        for (position, list) in assignment.iter().enumerate() {
            counts[*list] += 1;
            let sum = &mut sums[list * dimension..(list + 1) * dimension];
            for (acc, value) in sum.iter_mut().zip(storage.row(position)) {
                *acc += f64::from(*value);
            }
        }

        for list in 0..nlist {
            if counts[list] == 0 {
                continue;
            }
            let count = counts[list] as f64;
            for d in 0..dimension {
                centroids[list * dimension + d] = (sums[list * dimension + d] / count) as f32;
            }
        }
    }
}

impl VectorIndex for IvfIndex {
    fn dimension(&self) -> usize {
        self.storage.dimension()
    }

    fn len(&self) -> usize {
        self.storage.len()
    }

    fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>, VectorError> {
        if !check_query(self, query, k)? {
            return Ok(Vec::new());
        }

        let mut order: Vec<(f32, usize)> = (0..self.nlist())
            .map(|list| (squared_euclidean(query, self.centroid(list)), list))
            .collect();
        order.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut top = TopK::new(k, self.storage.len());
        for (probed, (_, list)) in order.into_iter().enumerate() {
            // Keep probing past nprobe until k candidates exist
            if probed >= self.nprobe && top.len() >= k {
                break;
            }
            for &position in &self.lists[list] {
                let distance = squared_euclidean(query, self.storage.row(position));
                top.offer(self.storage.id(position), distance);
            }
        }

        Ok(top.into_sorted())
    }
}

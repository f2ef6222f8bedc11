//! Vector arithmetic shared by the query pipeline and the indexes

use super::error::VectorError;

/// Element-wise arithmetic mean of the given vectors (mean pooling).
///
/// All inputs must share the dimensionality of the first one. A single input
/// is returned unchanged. Sums are accumulated in `f64` so the result does not
/// depend on input order beyond the final rounding to `f32`.
pub fn aggregate(vectors: &[Vec<f32>]) -> Result<Vec<f32>, VectorError> {
    let first = vectors.first().ok_or(VectorError::EmptyInput)?;
    let dimension = first.len();

    for vector in vectors {
        if vector.len() != dimension {
            return Err(VectorError::DimensionMismatch {
                expected: dimension,
                actual: vector.len(),
            });
        }
    }

    if vectors.len() == 1 {
        return Ok(first.clone());
    }

    let mut sums = vec![0.0f64; dimension];
    for vector in vectors {
        for (sum, value) in sums.iter_mut().zip(vector) {
            *sum += f64::from(*value);
        }
    }

    let count = vectors.len() as f64;
    Ok(sums.into_iter().map(|sum| (sum / count) as f32).collect())
}

/// Euclidean (L2) norm, kept in `f64` so large components do not overflow
pub fn l2_norm(vector: &[f32]) -> f64 {
    vector
        .iter()
        .map(|x| f64::from(*x) * f64::from(*x))
        .sum::<f64>()
        .sqrt()
}

/// Rescale a vector to unit Euclidean norm.
///
/// Fails with [`VectorError::ZeroVector`] when the norm is exactly zero.
pub fn normalize(vector: &[f32]) -> Result<Vec<f32>, VectorError> {
    let norm = l2_norm(vector);
    if norm == 0.0 {
        return Err(VectorError::ZeroVector);
    }
    Ok(vector
        .iter()
        .map(|x| (f64::from(*x) / norm) as f32)
        .collect())
}

/// Squared Euclidean distance. Callers guarantee equal lengths.
#[inline]
pub fn squared_euclidean(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Check that `vector` has the expected dimensionality
pub fn ensure_dimension(vector: &[f32], expected: usize) -> Result<(), VectorError> {
    if vector.len() != expected {
        return Err(VectorError::DimensionMismatch {
            expected,
            actual: vector.len(),
        });
    }
    Ok(())
}

//! Distance to similarity conversion

use thiserror::Error;

/// Default distance at which similarity reaches zero.
///
/// Squared Euclidean distance between unit vectors spans `[0, 4]`; a scale of
/// 2 maps identical vectors to 100% and orthogonal ones to 0%.
pub const DEFAULT_SIMILARITY_SCALE: f64 = 2.0;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Similarity scale must be positive and finite, got {scale}")]
pub struct InvalidScale {
    pub scale: f64,
}

/// Maps squared distances onto a `[0, 100]` percentage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scorer {
    scale: f64,
}

impl Default for Scorer {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SIMILARITY_SCALE,
        }
    }
}

impl Scorer {
    pub fn new(scale: f64) -> Result<Self, InvalidScale> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(InvalidScale { scale });
        }
        Ok(Self { scale })
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Similarity percentage for a distance, rounded to two decimals
    pub fn similarity(&self, distance: f32) -> f64 {
        similarity(f64::from(distance), self.scale)
    }
}

/// `max(0, 1 - distance / scale) * 100`, rounded to two decimals.
///
/// The result is also capped at 100 so a negative distance (impossible for
/// squared Euclidean, but not rejected here) cannot exceed the range.
pub fn similarity(distance: f64, scale: f64) -> f64 {
    let raw = (1.0 - distance / scale).clamp(0.0, 1.0) * 100.0;
    (raw * 100.0).round() / 100.0
}

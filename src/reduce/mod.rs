//! Dimensionality reduction: embeddings to points in the unit square.
//!
//! A [`Reducer`] maps `n` equal-length vectors to `n` [`Point2D`]s, index for index.
//! Output is normalized per axis into `[0, 1]` so a renderer can scale directly to
//! pixel coordinates. An axis with no spread collapses to `0.5`.
//!
//! Input is validated up front: every vector must have the first vector's length
//! and contain only finite values. Empty input is not an error and yields an empty
//! output.

mod pca;

pub use pca::{Pca, PcaParams};

use crate::error::{Error, Result};
use crate::geometry::Point2D;

/// Common interface for 2D projections of embedding vectors.
pub trait Reducer {
    /// Project `vectors` to 2D, one point per vector in the same order.
    fn reduce(&self, vectors: &[Vec<f32>]) -> Result<Vec<Point2D>>;
}

/// Project `vectors` with the default [`Pca`] reducer.
pub fn reduce_to_2d(vectors: &[Vec<f32>]) -> Result<Vec<Point2D>> {
    Pca::default().reduce(vectors)
}

/// Check that all vectors share one length and hold only finite values.
///
/// Returns the common dimension (0 for empty input).
pub(crate) fn validate(vectors: &[Vec<f32>]) -> Result<usize> {
    let Some(first) = vectors.first() else {
        return Ok(0);
    };
    let d = first.len();
    for (index, v) in vectors.iter().enumerate() {
        if v.len() != d {
            return Err(Error::DimensionMismatch {
                index,
                expected: d,
                found: v.len(),
            });
        }
        if let Some(component) = v.iter().position(|x| !x.is_finite()) {
            return Err(Error::NonFinite { index, component });
        }
    }
    Ok(d)
}

/// Min-max scale each axis of `coords` into `[0, 1]`.
pub(crate) fn normalize_unit(coords: &[[f64; 2]]) -> Vec<Point2D> {
    let mut lo = [f64::INFINITY; 2];
    let mut hi = [f64::NEG_INFINITY; 2];
    for c in coords {
        for axis in 0..2 {
            lo[axis] = lo[axis].min(c[axis]);
            hi[axis] = hi[axis].max(c[axis]);
        }
    }

    // Spread below this is rounding noise, not structure.
    let magnitude = lo.iter().chain(hi.iter()).fold(0.0f64, |m, v| m.max(v.abs()));
    let flat = 1e-9 * magnitude;

    let scale = |v: f64, axis: usize| -> f32 {
        let range = hi[axis] - lo[axis];
        if range > flat {
            ((v - lo[axis]) / range).clamp(0.0, 1.0) as f32
        } else {
            0.5
        }
    };

    coords
        .iter()
        .map(|c| Point2D::new(scale(c[0], 0), scale(c[1], 1)))
        .collect()
}

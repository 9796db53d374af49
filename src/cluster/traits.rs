use crate::error::Result;
use crate::geometry::Point2D;

use super::ClusteringResult;

/// Common interface for clustering a projected point set.
pub trait Clustering {
    /// Partition `points` into clusters and noise.
    ///
    /// The returned labels are index-aligned with `points`.
    fn fit(&self, points: &[Point2D]) -> Result<ClusteringResult>;
}

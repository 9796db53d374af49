//! Planar geometry for projected embeddings.
//!
//! Everything downstream of the reducer works on [`Point2D`]: the parameter
//! estimator and DBSCAN measure Euclidean distance between points, and the hull
//! builder uses the orientation test ([`cross`]) to walk the boundary of a cluster.

mod hull;

pub use hull::compute_convex_hull;

use serde::{Deserialize, Serialize};

/// A point in the plane.
///
/// Points produced by the reducer lie in `[0, 1]` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point2D {
    /// Create a point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    ///
    /// Symmetric bit-for-bit: `a.distance(b) == b.distance(a)`.
    #[inline]
    pub fn distance(&self, other: &Point2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<[f32; 2]> for Point2D {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

/// Orientation of `b` relative to the directed line `o -> a`.
///
/// Positive when `b` is to the left (counter-clockwise turn), negative when to the
/// right, zero when collinear. Computed in `f64`.
#[inline]
pub fn cross(o: &Point2D, a: &Point2D, b: &Point2D) -> f64 {
    let (ox, oy) = (f64::from(o.x), f64::from(o.y));
    (f64::from(a.x) - ox) * (f64::from(b.y) - oy) - (f64::from(a.y) - oy) * (f64::from(b.x) - ox)
}

/// Arithmetic mean of `points`, or `None` when empty.
pub fn centroid(points: &[Point2D]) -> Option<Point2D> {
    if points.is_empty() {
        return None;
    }
    let (sx, sy) = points.iter().fold((0.0f64, 0.0f64), |(sx, sy), p| {
        (sx + f64::from(p.x), sy + f64::from(p.y))
    });
    let n = points.len() as f64;
    Some(Point2D::new((sx / n) as f32, (sy / n) as f32))
}

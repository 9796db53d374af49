use serde::{Deserialize, Serialize};

use crate::geometry::{self, compute_convex_hull, Point2D};

/// Label marking a point that belongs to no cluster.
pub const NOISE: i32 = -1;

/// DBSCAN parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbscanParams {
    /// Neighborhood radius (inclusive).
    pub eps: f32,
    /// Minimum neighborhood size, counting the point itself, for a core point.
    pub min_pts: usize,
}

/// One discovered cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Cluster id, assigned in discovery order from 0.
    pub id: usize,
    /// Member point indices, ascending.
    pub points: Vec<usize>,
    /// Display color (CSS `hsl(...)`).
    pub color: String,
}

impl Cluster {
    /// Number of member points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the cluster has no members (never true for DBSCAN output).
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Member coordinates, looked up in the point set the cluster was built from.
    pub fn member_points(&self, points: &[Point2D]) -> Vec<Point2D> {
        self.points.iter().map(|&i| points[i]).collect()
    }

    /// Mean position of the members, for placing a label.
    pub fn centroid(&self, points: &[Point2D]) -> Option<Point2D> {
        geometry::centroid(&self.member_points(points))
    }

    /// Convex hull of the members.
    pub fn hull(&self, points: &[Point2D]) -> Vec<Point2D> {
        compute_convex_hull(&self.member_points(points))
    }
}

/// Output of a clustering run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusteringResult {
    /// One label per point: a cluster id, or [`NOISE`].
    pub labels: Vec<i32>,
    /// Clusters in id order.
    pub clusters: Vec<Cluster>,
    /// Indices labeled [`NOISE`], ascending.
    pub noise_points: Vec<usize>,
}

impl ClusteringResult {
    /// Number of clusters found.
    pub fn n_clusters(&self) -> usize {
        self.clusters.len()
    }

    /// Cluster id of point `index`, or `None` for noise.
    pub fn cluster_of(&self, index: usize) -> Option<usize> {
        self.labels
            .get(index)
            .and_then(|&l| usize::try_from(l).ok())
    }

    /// Whether point `index` is noise.
    pub fn is_noise(&self, index: usize) -> bool {
        self.labels.get(index) == Some(&NOISE)
    }
}

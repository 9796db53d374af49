//! DBSCAN: Density-Based Spatial Clustering of Applications with Noise.
//!
//! # The Algorithm (Ester et al., 1996)
//!
//! DBSCAN groups points by neighborhood density. Unlike k-means, it:
//!
//! - Discovers clusters of arbitrary shape
//! - Determines the number of clusters itself
//! - Identifies noise points (outliers)
//!
//! ## Core Concepts
//!
//! - **Epsilon (ε)**: Maximum distance between two points to be neighbors (inclusive).
//! - **MinPts**: Minimum neighborhood size, counting the point itself, for a core point.
//! - **Core point**: Has at least MinPts points within ε.
//! - **Border point**: Within ε of a core point but not core itself.
//! - **Noise point**: Neither core nor border.
//!
//! ## Algorithm Steps
//!
//! 1. For each unvisited point P, in index order:
//!    - Find the points within ε of P
//!    - If fewer than MinPts, mark P as noise (may become a border point later)
//!    - Else P is core: start a new cluster and expand from its neighbors
//!
//! 2. Expansion, breadth-first in discovery order: every reached point joins the
//!    cluster; only core points push their own neighbors. A point that already
//!    belongs to a cluster keeps its label.
//!
//! Cluster ids follow seed discovery order (0, 1, 2, ...), so a fixed input order
//! gives fixed labels.
//!
//! ## Complexity
//!
//! - **Time**: O(n²). Every region query scans all points; there is no spatial index.
//!   Fine for a few thousand points, the intended range for an on-screen map.
//! - **Space**: O(n) for labels.
//!
//! ## References
//!
//! Ester et al. (1996). "A Density-Based Algorithm for Discovering Clusters
//! in Large Spatial Databases with Noise." KDD-96.

use std::collections::VecDeque;

use tracing::debug;

use super::result::{Cluster, ClusteringResult, DbscanParams, NOISE};
use super::traits::Clustering;
use super::util::region_query;
use crate::color::generate_colors_seeded;
use crate::error::{Error, Result};
use crate::geometry::Point2D;

// Internal label for points not yet reached.
const UNCLASSIFIED: i32 = -2;

/// DBSCAN clustering algorithm.
#[derive(Debug, Clone)]
pub struct Dbscan {
    /// Epsilon: maximum distance for neighborhood.
    epsilon: f32,
    /// Minimum points for core point classification.
    min_pts: usize,
    /// Seed for cluster colors (`None` draws from the thread RNG).
    color_seed: Option<u64>,
}

impl Dbscan {
    /// Create a new DBSCAN clusterer.
    ///
    /// # Arguments
    ///
    /// * `epsilon` - Maximum distance between two points to be neighbors.
    /// * `min_pts` - Minimum neighborhood size (point included) for a core point.
    ///
    /// [`estimate_dbscan_params`](super::estimate_dbscan_params) derives both from
    /// the data.
    pub fn new(epsilon: f32, min_pts: usize) -> Self {
        Self {
            epsilon,
            min_pts,
            color_seed: None,
        }
    }

    /// Create a clusterer from estimated parameters.
    pub fn from_params(params: DbscanParams) -> Self {
        Self::new(params.eps, params.min_pts)
    }

    /// Set epsilon (neighborhood radius).
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set minimum points for core classification.
    pub fn with_min_pts(mut self, min_pts: usize) -> Self {
        self.min_pts = min_pts;
        self
    }

    /// Seed the cluster color generator.
    pub fn with_color_seed(mut self, seed: u64) -> Self {
        self.color_seed = Some(seed);
        self
    }

    /// Current parameters.
    pub fn params(&self) -> DbscanParams {
        DbscanParams {
            eps: self.epsilon,
            min_pts: self.min_pts,
        }
    }

    /// Expand cluster from a core point.
    fn expand_cluster(
        &self,
        points: &[Point2D],
        point_idx: usize,
        neighbors: Vec<usize>,
        labels: &mut [i32],
        cluster_id: i32,
        visited: &mut [bool],
    ) {
        labels[point_idx] = cluster_id;

        let mut to_process: VecDeque<usize> = neighbors.into();

        while let Some(neighbor_idx) = to_process.pop_front() {
            // Noise found earlier becomes a border point of this cluster.
            if labels[neighbor_idx] == UNCLASSIFIED || labels[neighbor_idx] == NOISE {
                labels[neighbor_idx] = cluster_id;
            }

            if visited[neighbor_idx] {
                continue;
            }
            visited[neighbor_idx] = true;

            let neighbor_neighbors = region_query(points, neighbor_idx, self.epsilon);
            if neighbor_neighbors.len() < self.min_pts {
                continue;
            }

            for nn in neighbor_neighbors {
                if labels[nn] == NOISE {
                    labels[nn] = cluster_id;
                }
                if !visited[nn] {
                    to_process.push_back(nn);
                }
            }
        }
    }
}

impl Clustering for Dbscan {
    fn fit(&self, points: &[Point2D]) -> Result<ClusteringResult> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(Error::InvalidParameter {
                name: "epsilon",
                message: "must be positive and finite",
            });
        }

        if self.min_pts == 0 {
            return Err(Error::InvalidParameter {
                name: "min_pts",
                message: "must be at least 1",
            });
        }

        let n = points.len();
        if n == 0 {
            return Ok(ClusteringResult::default());
        }

        let mut labels = vec![UNCLASSIFIED; n];
        let mut visited = vec![false; n];
        let mut cluster_id: i32 = 0;

        for point_idx in 0..n {
            if visited[point_idx] {
                continue;
            }
            visited[point_idx] = true;

            let neighbors = region_query(points, point_idx, self.epsilon);
            if neighbors.len() < self.min_pts {
                labels[point_idx] = NOISE;
                continue;
            }

            self.expand_cluster(
                points,
                point_idx,
                neighbors,
                &mut labels,
                cluster_id,
                &mut visited,
            );
            cluster_id += 1;
        }

        let n_clusters = cluster_id as usize;
        let mut members: Vec<Vec<usize>> = vec![Vec::new(); n_clusters];
        let mut noise_points = Vec::new();
        for (i, &l) in labels.iter().enumerate() {
            match usize::try_from(l) {
                Ok(c) => members[c].push(i),
                Err(_) => noise_points.push(i),
            }
        }

        let colors = generate_colors_seeded(n_clusters, self.color_seed);
        let clusters: Vec<Cluster> = members
            .into_iter()
            .zip(colors)
            .enumerate()
            .map(|(id, (points, color))| Cluster { id, points, color })
            .collect();

        debug!(
            n,
            eps = self.epsilon,
            min_pts = self.min_pts,
            clusters = clusters.len(),
            noise = noise_points.len(),
            "dbscan: clustered"
        );

        Ok(ClusteringResult {
            labels,
            clusters,
            noise_points,
        })
    }
}

/// Run DBSCAN with the given parameters.
pub fn dbscan(points: &[Point2D], eps: f32, min_pts: usize) -> Result<ClusteringResult> {
    Dbscan::new(eps, min_pts).fit(points)
}

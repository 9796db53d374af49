//! Density clustering of projected points.
//!
//! ## DBSCAN
//!
//! Density-based clustering that discovers non-convex clusters and marks outliers
//! as noise without being told how many clusters to find. Two parameters control
//! it:
//!
//! - `eps`: neighborhood radius
//! - `min_pts`: neighborhood size (point included) that makes a point *core*
//!
//! ## Choosing parameters
//!
//! `eps` is scale dependent and hard to pick by hand. The estimator reads it off the
//! k-distance curve of the data itself and scales `min_pts` with `ln n`, so a map of
//! 30 points and a map of 3000 points both get sensible settings.
//!
//! ## Output
//!
//! A [`ClusteringResult`] is a partition: each index is in exactly one cluster's
//! `points` or in `noise_points`, and `labels[i]` is the cluster id or [`NOISE`].
//!
//! ## Usage
//!
//! ```rust
//! use embedmap::cluster::{estimate_dbscan_params, Clustering, Dbscan};
//! use embedmap::Point2D;
//!
//! let points = vec![
//!     Point2D::new(0.10, 0.10),
//!     Point2D::new(0.11, 0.10),
//!     Point2D::new(0.10, 0.11),
//!     Point2D::new(0.90, 0.90),
//!     Point2D::new(0.91, 0.90),
//!     Point2D::new(0.90, 0.91),
//! ];
//!
//! let params = estimate_dbscan_params(&points);
//! let result = Dbscan::from_params(params).fit(&points).unwrap();
//! assert_eq!(result.labels.len(), points.len());
//!
//! let result = Dbscan::new(0.05, 3).fit(&points).unwrap();
//! assert_eq!(result.n_clusters(), 2);
//! ```

mod dbscan;
mod estimate;
mod result;
mod traits;
mod util;

pub use dbscan::{dbscan, Dbscan};
pub use estimate::{estimate_dbscan_params, estimate_dbscan_params_with, k_distances, EstimatorParams};
pub use result::{Cluster, ClusteringResult, DbscanParams, NOISE};
pub use traits::Clustering;

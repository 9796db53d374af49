//! Embedding maps.
//!
//! `embedmap` turns a set of high-dimensional embedding vectors into something a
//! plotting layer can draw:
//!
//! - [`reduce`]: PCA projection into the unit square, index-aligned with the input
//! - [`cluster`]: DBSCAN with parameters estimated from the projected points
//! - [`geometry`]: points and convex hulls for cluster overlays
//! - [`color`]: golden-ratio categorical colors
//! - [`pipeline`]: all of the above behind one call, driven by a small config
//!
//! Everything is synchronous and stateless; calls can run concurrently.
//!
//! ```rust
//! use embedmap::{compute_convex_hull, dbscan, estimate_dbscan_params, reduce_to_2d};
//!
//! let vectors = vec![
//!     vec![0.0, 0.0, 1.0],
//!     vec![0.1, 0.0, 1.0],
//!     vec![0.0, 0.1, 1.0],
//!     vec![5.0, 5.0, 0.0],
//!     vec![5.1, 5.0, 0.0],
//!     vec![5.0, 5.1, 0.0],
//! ];
//!
//! let points = reduce_to_2d(&vectors).unwrap();
//! let params = estimate_dbscan_params(&points);
//! let result = dbscan(&points, params.eps, params.min_pts).unwrap();
//! for cluster in &result.clusters {
//!     let hull = compute_convex_hull(&cluster.member_points(&points));
//!     assert!(!hull.is_empty());
//! }
//! ```

#![forbid(unsafe_code)]

pub mod cluster;
pub mod color;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod reduce;

pub use cluster::{
    dbscan, estimate_dbscan_params, Cluster, ClusteringResult, Clustering, Dbscan, DbscanParams,
    NOISE,
};
pub use color::{generate_colors, generate_colors_seeded, CategoryPalette};
pub use error::{Error, Result};
pub use geometry::{compute_convex_hull, Point2D};
pub use pipeline::{
    build_visualization, ColorBy, EmbeddingRecord, Visualization, VisualizationConfig,
};
pub use reduce::{reduce_to_2d, Pca, PcaParams, Reducer};

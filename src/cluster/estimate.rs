//! Data-driven DBSCAN parameters.
//!
//! `min_pts` grows with the logarithm of the point count:
//!
//! ```text
//! min_pts = min(max(floor, round(ln n)), n)
//! ```
//!
//! `eps` comes from the k-distance curve (k = `min_pts - 1`, since the neighborhood
//! count includes the point itself): every point's distance to its k-th nearest
//! neighbor, sorted ascending. Dense points sit on the flat left part of the curve
//! and outliers on the steep right part. The knee between them is the sample lying
//! furthest below the chord from the first to the last sample, with both axes
//! scaled to `[0, 1]`.
//!
//! The knee is the widest spacing among dense points, not the gap a cluster must
//! bridge to stay connected, so `eps` is the knee times
//! [`EstimatorParams::eps_margin`].
//!
//! `eps` is never below [`EstimatorParams::min_eps`], so coincident points still get
//! a positive radius. With fewer than two points the estimate makes everything noise.

use tracing::debug;

use super::result::DbscanParams;
use super::util::kth_neighbor_distances;
use crate::geometry::Point2D;

/// Knobs for [`estimate_dbscan_params_with`].
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EstimatorParams {
    /// Lower bound for `min_pts` (before capping at the point count).
    pub min_pts_floor: usize,
    /// Smallest `eps` ever returned.
    pub min_eps: f32,
    /// Factor applied to the knee distance.
    pub eps_margin: f32,
}

impl Default for EstimatorParams {
    fn default() -> Self {
        Self {
            min_pts_floor: 3,
            min_eps: 1e-6,
            eps_margin: 2.0,
        }
    }
}

/// Estimate DBSCAN parameters with default settings.
pub fn estimate_dbscan_params(points: &[Point2D]) -> DbscanParams {
    estimate_dbscan_params_with(points, &EstimatorParams::default())
}

/// Estimate DBSCAN parameters.
pub fn estimate_dbscan_params_with(points: &[Point2D], params: &EstimatorParams) -> DbscanParams {
    let n = points.len();
    let defaults = EstimatorParams::default();
    let min_eps = if params.min_eps.is_finite() && params.min_eps > 0.0 {
        params.min_eps
    } else {
        defaults.min_eps
    };
    let margin = if params.eps_margin.is_finite() && params.eps_margin > 0.0 {
        params.eps_margin
    } else {
        defaults.eps_margin
    };

    // A lone point needs min_pts 2 to stay noise; 0 is not a valid min_pts.
    if n < 2 {
        return DbscanParams {
            eps: min_eps,
            min_pts: 2,
        };
    }

    let log_n = (n as f64).ln().round() as usize;
    let min_pts = params.min_pts_floor.max(log_n).min(n).max(1);
    let k = min_pts.saturating_sub(1).max(1);

    let curve = k_distances(points, k);
    let knee = knee_of(&curve);
    let eps = knee * margin;
    let eps = if eps.is_finite() { eps.max(min_eps) } else { min_eps };

    debug!(n, k, knee, eps, min_pts, "estimate: dbscan params");
    DbscanParams { eps, min_pts }
}

/// Sorted (ascending) distances from each point to its `k`-th nearest neighbor.
///
/// Empty for fewer than two points.
pub fn k_distances(points: &[Point2D], k: usize) -> Vec<f32> {
    if points.len() < 2 {
        return Vec::new();
    }
    let mut d = kth_neighbor_distances(points, k);
    d.sort_by(|a, b| a.total_cmp(b));
    d
}

/// Knee of an ascending curve; a flat or tiny curve yields its last value.
fn knee_of(sorted: &[f32]) -> f32 {
    let Some(&last) = sorted.last() else {
        return 0.0;
    };
    let first = sorted[0];
    let m = sorted.len();
    let span = f64::from(last) - f64::from(first);
    if m < 3 || !(span > 0.0) {
        return last;
    }

    let mut best = (m - 1, 0.0f64);
    for (i, &d) in sorted.iter().enumerate() {
        let x = i as f64 / (m - 1) as f64;
        let y = (f64::from(d) - f64::from(first)) / span;
        let gap = x - y;
        if gap > best.1 {
            best = (i, gap);
        }
    }
    sorted[best.0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{dbscan, NOISE};
    use rand::prelude::*;

    /// 5 x 4 grid, spacing 0.01, with deterministic jitter below 0.0005.
    fn blob(cx: f32, cy: f32) -> Vec<Point2D> {
        (0..20)
            .map(|i| {
                let (col, row) = ((i % 5) as f32, (i / 5) as f32);
                let jx = 0.001 * ((i * 7) % 11) as f32 / 11.0 - 0.0005;
                let jy = 0.001 * ((i * 7 + 13) % 11) as f32 / 11.0 - 0.0005;
                Point2D::new(cx + (col - 2.0) * 0.01 + jx, cy + (row - 1.5) * 0.01 + jy)
            })
            .collect()
    }

    fn outliers() -> [Point2D; 5] {
        [
            Point2D::new(0.5, 0.1),
            Point2D::new(0.1, 0.9),
            Point2D::new(0.9, 0.1),
            Point2D::new(0.5, 0.5),
            Point2D::new(0.5, 0.9),
        ]
    }

    #[test]
    fn two_groups_with_outliers() {
        let mut points = blob(0.1, 0.1);
        points.extend(blob(0.9, 0.9));
        points.extend(outliers());

        let params = estimate_dbscan_params(&points);
        assert_eq!(params.min_pts, 4);
        assert!(params.eps > 0.01 && params.eps < 0.05, "eps = {}", params.eps);

        let result = dbscan(&points, params.eps, params.min_pts).unwrap();
        assert_eq!(result.n_clusters(), 2);
        assert!(result.noise_points.len() >= 3);
        assert!(result.labels[..20].iter().all(|&l| l == 0));
        assert!(result.labels[20..40].iter().all(|&l| l == 1));
        assert!(result.labels[40..].iter().all(|&l| l == NOISE));
    }

    /// Two groups of 20 with uniform jitter at (0.1, 0.1) and (0.9, 0.9), then 5
    /// far outliers.
    fn jittered_scene(seed: u64, jitter: f32) -> Vec<Point2D> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut points = Vec::with_capacity(45);
        for c in [0.1f32, 0.9] {
            for _ in 0..20 {
                let dx = rng.random_range(-jitter..jitter);
                let dy = rng.random_range(-jitter..jitter);
                points.push(Point2D::new(c + dx, c + dy));
            }
        }
        points.extend(outliers());
        points
    }

    #[test]
    fn jittered_groups_stay_connected() {
        for jitter in [0.01f32, 0.02, 0.03, 0.05] {
            for seed in 0..100 {
                let points = jittered_scene(seed, jitter);
                let params = estimate_dbscan_params(&points);
                let result = dbscan(&points, params.eps, params.min_pts).unwrap();

                let ctx = format!("seed {seed}, jitter {jitter}, params {params:?}");
                assert_eq!(result.n_clusters(), 2, "{ctx}");
                assert!(result.labels[..20].iter().all(|&l| l == 0), "{ctx}");
                assert!(result.labels[20..40].iter().all(|&l| l == 1), "{ctx}");
                assert!(result.labels[40..].iter().all(|&l| l == NOISE), "{ctx}");
            }
        }
    }

    #[test]
    fn eps_is_knee_times_margin() {
        let mut points = blob(0.1, 0.1);
        points.extend(blob(0.9, 0.9));
        points.extend(outliers());

        let curve = k_distances(&points, 3);
        let knee = knee_of(&curve);
        let tight = EstimatorParams {
            eps_margin: 1.0,
            ..Default::default()
        };
        assert_eq!(estimate_dbscan_params_with(&points, &tight).eps, knee);
        assert_eq!(estimate_dbscan_params(&points).eps, knee * 2.0);
    }

    #[test]
    fn fewer_than_two_points_is_all_noise() {
        let empty = estimate_dbscan_params(&[]);
        assert!(empty.eps > 0.0);
        let result = dbscan(&[], empty.eps, empty.min_pts).unwrap();
        assert!(result.labels.is_empty());

        let one = [Point2D::new(0.3, 0.3)];
        let params = estimate_dbscan_params(&one);
        assert!(params.eps > 0.0);
        let result = dbscan(&one, params.eps, params.min_pts).unwrap();
        assert_eq!(result.noise_points, vec![0]);
    }

    #[test]
    fn coincident_points_get_positive_eps() {
        let points = vec![Point2D::new(0.5, 0.5); 8];
        let params = estimate_dbscan_params(&points);
        assert!(params.eps > 0.0);
        assert_eq!(params.eps, EstimatorParams::default().min_eps);
    }

    #[test]
    fn min_pts_never_exceeds_point_count() {
        for n in 2..6 {
            let points: Vec<Point2D> = (0..n).map(|i| Point2D::new(i as f32, 0.0)).collect();
            let params = estimate_dbscan_params(&points);
            assert!(params.min_pts <= n, "n = {n}, min_pts = {}", params.min_pts);
            assert!(params.eps > 0.0);
        }
    }

    #[test]
    fn min_pts_grows_logarithmically() {
        let points: Vec<Point2D> = (0..2000)
            .map(|i| Point2D::new((i % 50) as f32 * 0.02, (i / 50) as f32 * 0.025))
            .collect();
        let params = estimate_dbscan_params(&points);
        // ln(2000) = 7.6
        assert_eq!(params.min_pts, 8);
    }

    #[test]
    fn knee_picks_last_dense_sample() {
        let curve = [0.1, 0.1, 0.11, 0.12, 0.12, 0.13, 2.0, 3.0];
        assert_eq!(knee_of(&curve), 0.13);
        assert_eq!(knee_of(&[0.2, 0.2, 0.2]), 0.2);
        assert_eq!(knee_of(&[0.4, 0.9]), 0.9);
    }

    #[test]
    fn k_distance_curve_is_sorted() {
        let points = blob(0.5, 0.5);
        let curve = k_distances(&points, 3);
        assert_eq!(curve.len(), 20);
        assert!(curve.windows(2).all(|w| w[0] <= w[1]));
        assert!(k_distances(&points[..1], 3).is_empty());
    }
}

use embedmap::cluster::{dbscan, estimate_dbscan_params};
use embedmap::geometry::cross;
use embedmap::{compute_convex_hull, generate_colors, reduce_to_2d, Point2D, NOISE};
use proptest::prelude::*;
use std::collections::HashSet;

fn points_strategy(max: usize) -> impl Strategy<Value = Vec<Point2D>> {
    prop::collection::vec((0.0f32..1.0, 0.0f32..1.0), 0..max)
        .prop_map(|v| v.into_iter().map(|(x, y)| Point2D::new(x, y)).collect())
}

proptest! {
    #[test]
    fn prop_reduce_keeps_index_correspondence(
        data in prop::collection::vec(prop::collection::vec(-10.0f32..10.0, 6), 0..30)
    ) {
        let points = reduce_to_2d(&data).unwrap();
        prop_assert_eq!(points.len(), data.len());
        for p in &points {
            prop_assert!((0.0..=1.0).contains(&p.x));
            prop_assert!((0.0..=1.0).contains(&p.y));
        }
    }

    #[test]
    fn prop_clustering_is_a_partition(
        points in points_strategy(60),
        eps in 0.01f32..0.5,
        min_pts in 1usize..6
    ) {
        let result = dbscan(&points, eps, min_pts).unwrap();
        prop_assert_eq!(result.labels.len(), points.len());

        let mut seen = vec![0usize; points.len()];
        for (id, cluster) in result.clusters.iter().enumerate() {
            prop_assert_eq!(cluster.id, id);
            prop_assert!(!cluster.points.is_empty());
            for &i in &cluster.points {
                seen[i] += 1;
                prop_assert_eq!(result.labels[i], id as i32);
            }
        }
        for &i in &result.noise_points {
            seen[i] += 1;
            prop_assert_eq!(result.labels[i], NOISE);
        }
        prop_assert!(seen.iter().all(|&c| c == 1));
    }

    #[test]
    fn prop_clustering_is_deterministic(
        points in points_strategy(60),
        eps in 0.01f32..0.5,
        min_pts in 1usize..6
    ) {
        let a = dbscan(&points, eps, min_pts).unwrap();
        let b = dbscan(&points, eps, min_pts).unwrap();
        prop_assert_eq!(a.labels, b.labels);
    }

    #[test]
    fn prop_larger_eps_never_adds_noise(
        points in points_strategy(60),
        eps in 0.01f32..0.3,
        grow in 0.0f32..0.3,
        min_pts in 1usize..6
    ) {
        let small = dbscan(&points, eps, min_pts).unwrap();
        let large = dbscan(&points, eps + grow, min_pts).unwrap();
        prop_assert!(large.noise_points.len() <= small.noise_points.len());
    }

    #[test]
    fn prop_estimated_params_are_usable(points in points_strategy(80)) {
        let params = estimate_dbscan_params(&points);
        prop_assert!(params.eps > 0.0 && params.eps.is_finite());
        if points.len() >= 2 {
            prop_assert!(params.min_pts <= points.len());
        }
        let result = dbscan(&points, params.eps, params.min_pts).unwrap();
        prop_assert_eq!(result.labels.len(), points.len());
    }

    #[test]
    fn prop_hull_contains_every_point(
        raw in prop::collection::vec((-10.0f32..10.0, -10.0f32..10.0), 3..40)
    ) {
        let points: Vec<Point2D> = raw.into_iter().map(|(x, y)| Point2D::new(x, y)).collect();
        let hull = compute_convex_hull(&points);
        prop_assert!(hull.len() >= 3);
        prop_assert!(hull.len() <= points.len());

        let m = hull.len();
        for p in &points {
            for i in 0..m {
                let side = cross(&hull[i], &hull[(i + 1) % m], p);
                prop_assert!(side >= -1e-6, "point {:?} outside edge {}", p, i);
            }
        }
    }

    #[test]
    fn prop_hull_contains_grid_points(
        raw in prop::collection::vec((0u8..5, 0u8..5), 3..20)
    ) {
        // Small integer grid: collinear runs and duplicates are common.
        let points: Vec<Point2D> = raw
            .into_iter()
            .map(|(x, y)| Point2D::new(f32::from(x), f32::from(y)))
            .collect();
        let hull = compute_convex_hull(&points);
        prop_assert!(!hull.is_empty());
        prop_assert!(hull.len() <= points.len());

        let m = hull.len();
        for p in &points {
            for i in 0..m {
                let side = cross(&hull[i], &hull[(i + 1) % m], p);
                prop_assert!(side >= 0.0, "point {:?} outside edge {} of {:?}", p, i, hull);
            }
        }
        for (i, v) in hull.iter().enumerate() {
            prop_assert!(!hull[i + 1..].contains(v), "repeated vertex {:?}", v);
        }
    }
}

#[test]
fn color_counts_and_distinctness() {
    for n in [0usize, 1, 5, 50] {
        let colors = generate_colors(n);
        assert_eq!(colors.len(), n);
        let unique: HashSet<&String> = colors.iter().collect();
        assert_eq!(unique.len(), n);
    }
}

use crate::geometry::Point2D;

/// Indices of all points within `eps` of `points[idx]`, the point itself included.
///
/// Brute force, O(n) per query.
pub(crate) fn region_query(points: &[Point2D], idx: usize, eps: f32) -> Vec<usize> {
    let p = &points[idx];
    points
        .iter()
        .enumerate()
        .filter(|(_, other)| p.distance(other) <= eps)
        .map(|(i, _)| i)
        .collect()
}

/// Distance from each point to its `k`-th nearest other point.
///
/// `k` is clamped to `1..=n-1`. Requires at least two points.
pub(crate) fn kth_neighbor_distances(points: &[Point2D], k: usize) -> Vec<f32> {
    let n = points.len();
    debug_assert!(n >= 2);
    let k = k.min(n - 1).max(1);

    let mut row: Vec<f32> = Vec::with_capacity(n - 1);
    let mut out = Vec::with_capacity(n);
    for (i, p) in points.iter().enumerate() {
        row.clear();
        row.extend(
            points
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, q)| p.distance(q)),
        );
        let (_, kth, _) = row.select_nth_unstable_by(k - 1, |a, b| a.total_cmp(b));
        out.push(*kth);
    }
    out
}

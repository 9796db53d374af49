//! Convex hull by gift wrapping (Jarvis march).
//!
//! Starting from the leftmost point (lowest on ties), each step picks the candidate
//! that leaves every other point on its left, replacing the candidate when a point
//! is strictly to its right. A point collinear with the candidate replaces it when
//! farther away, so every vertex is extreme and mid-edge points never become
//! vertices. The walk is counter-clockwise and stops when it returns to the start
//! point or after `n` vertices.
//!
//! ## Complexity
//!
//! O(n·h) for `h` hull vertices. Cluster sizes here are small.

use super::{cross, Point2D};

/// Boundary polygon of `points`, counter-clockwise, implicitly closed.
///
/// Fewer than 3 points are returned unchanged.
pub fn compute_convex_hull(points: &[Point2D]) -> Vec<Point2D> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let start = leftmost(points);
    let mut hull: Vec<Point2D> = Vec::new();
    let mut current = start;

    loop {
        hull.push(points[current]);

        // Never step onto a point coincident with the current vertex.
        let Some(mut next) = (1..n)
            .map(|off| (current + off) % n)
            .find(|&i| points[i] != points[current])
        else {
            break;
        };

        let origin = points[current];
        for (i, p) in points.iter().enumerate() {
            let turn = cross(&origin, &points[next], p);
            if turn < 0.0
                || (turn == 0.0 && origin.distance(p) > origin.distance(&points[next]))
            {
                next = i;
            }
        }

        current = next;
        if points[current] == points[start] || hull.len() >= n {
            break;
        }
    }

    hull
}

fn leftmost(points: &[Point2D]) -> usize {
    let mut best = 0;
    for (i, p) in points.iter().enumerate().skip(1) {
        let b = &points[best];
        if p.x < b.x || (p.x == b.x && p.y < b.y) {
            best = i;
        }
    }
    best
}

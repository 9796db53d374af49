//! PCA projection onto the two directions of largest variance.
//!
//! # Method
//!
//! The data is mean-centred and the top eigenvectors of the covariance `XᵀX` are
//! found by power iteration without ever forming the `d × d` matrix:
//!
//! ```text
//! v ← Xᵀ (X v) / ‖Xᵀ (X v)‖
//! ```
//!
//! The second direction repeats the iteration while projecting out the first
//! (Gram–Schmidt deflation). Each step costs O(n·d).
//!
//! Starting vectors are drawn from a `StdRng` seeded from [`PcaParams::seed`], so a
//! given input always projects to the same layout. Each direction is oriented so its
//! largest-magnitude component is positive, which removes the eigenvector sign
//! ambiguity.

use rand::prelude::*;
use tracing::debug;

use super::{normalize_unit, validate, Reducer};
use crate::error::{Error, Result};
use crate::geometry::Point2D;

/// PCA parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PcaParams {
    /// Maximum power-iteration steps per component.
    pub max_iter: usize,

    /// Stop once `1 - |⟨v_prev, v⟩|` falls below this.
    pub tolerance: f64,

    /// Seed for the starting vectors.
    pub seed: u64,
}

impl Default for PcaParams {
    fn default() -> Self {
        Self {
            max_iter: 200,
            tolerance: 1e-10,
            seed: 42,
        }
    }
}

/// Principal component reducer.
#[derive(Clone, Debug, Default)]
pub struct Pca {
    params: PcaParams,
}

impl Pca {
    /// Create a reducer with explicit parameters.
    pub fn new(params: PcaParams) -> Self {
        Self { params }
    }

    /// Set the starting-vector seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.params.seed = seed;
        self
    }

    /// Set the power-iteration cap.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.params.max_iter = max_iter;
        self
    }

    /// Set the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.params.tolerance = tolerance;
        self
    }

    /// Current parameters.
    pub fn params(&self) -> &PcaParams {
        &self.params
    }

    /// Run power iteration for one direction orthogonal to `previous`.
    ///
    /// Returns the zero vector when no variance remains.
    fn principal_direction(
        &self,
        centered: &[f64],
        n: usize,
        d: usize,
        previous: &[Vec<f64>],
        rng: &mut StdRng,
    ) -> Vec<f64> {
        let mut v: Vec<f64> = (0..d).map(|_| rng.random::<f64>() * 2.0 - 1.0).collect();
        orthogonalize(&mut v, previous);
        if normalize_in_place(&mut v) == 0.0 {
            return vec![0.0; d];
        }

        let mut xv = vec![0.0f64; n];
        let mut w = vec![0.0f64; d];
        let mut steps = 0;
        for _ in 0..self.params.max_iter {
            steps += 1;
            for (i, slot) in xv.iter_mut().enumerate() {
                *slot = dot(&centered[i * d..(i + 1) * d], &v);
            }
            w.iter_mut().for_each(|x| *x = 0.0);
            for (i, &s) in xv.iter().enumerate() {
                if s == 0.0 {
                    continue;
                }
                let row = &centered[i * d..(i + 1) * d];
                for (wj, rj) in w.iter_mut().zip(row) {
                    *wj += s * rj;
                }
            }
            orthogonalize(&mut w, previous);
            if normalize_in_place(&mut w) <= 1e-12 {
                return vec![0.0; d];
            }

            let change = 1.0 - dot(&w, &v).abs();
            std::mem::swap(&mut v, &mut w);
            if change < self.params.tolerance {
                break;
            }
        }

        debug!(steps, previous = previous.len(), "pca: direction converged");
        orient(&mut v);
        v
    }
}

impl Reducer for Pca {
    fn reduce(&self, vectors: &[Vec<f32>]) -> Result<Vec<Point2D>> {
        if self.params.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }

        let d = validate(vectors)?;
        let n = vectors.len();
        if n == 0 {
            return Ok(Vec::new());
        }

        // Mean-centre into a flat row-major buffer.
        let mut mean = vec![0.0f64; d];
        for v in vectors {
            for (m, &x) in mean.iter_mut().zip(v) {
                *m += f64::from(x);
            }
        }
        mean.iter_mut().for_each(|m| *m /= n as f64);

        let mut centered: Vec<f64> = Vec::with_capacity(n * d);
        for v in vectors {
            centered.extend(v.iter().zip(&mean).map(|(&x, m)| f64::from(x) - m));
        }

        let mut rng = StdRng::seed_from_u64(self.params.seed);
        let mut components: Vec<Vec<f64>> = Vec::with_capacity(2);
        for _ in 0..2 {
            let c = self.principal_direction(&centered, n, d, &components, &mut rng);
            components.push(c);
        }

        let coords: Vec<[f64; 2]> = (0..n)
            .map(|i| {
                let row = &centered[i * d..(i + 1) * d];
                [dot(row, &components[0]), dot(row, &components[1])]
            })
            .collect();

        debug!(n, dim = d, "pca: projected to 2d");
        Ok(normalize_unit(&coords))
    }
}

#[inline]
fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Scale to unit length; returns the original norm.
fn normalize_in_place(v: &mut [f64]) -> f64 {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
    norm
}

fn orthogonalize(v: &mut [f64], basis: &[Vec<f64>]) {
    for b in basis {
        let proj = dot(v, b);
        for (x, y) in v.iter_mut().zip(b) {
            *x -= proj * y;
        }
    }
}

/// Flip `v` so that its largest-magnitude component is positive.
fn orient(v: &mut [f64]) {
    let pivot = v
        .iter()
        .copied()
        .fold(0.0f64, |best, x| if x.abs() > best.abs() { x } else { best });
    if pivot < 0.0 {
        v.iter_mut().for_each(|x| *x = -*x);
    }
}

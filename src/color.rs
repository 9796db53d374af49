//! Categorical colors.
//!
//! Hues advance by the golden ratio conjugate from a random start, which spreads any
//! number of consecutive colors around the wheel without two neighbors landing close
//! together. Saturation and lightness vary inside a band that stays readable on a
//! dark background.
//!
//! Colors are CSS `hsl(...)` strings. Every call returns distinct strings. Pass a
//! seed (or your own RNG) for reproducible output; unseeded calls use the thread RNG.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use rand::prelude::*;

/// Fractional part of the golden ratio; the per-color hue step as a fraction of a turn.
pub const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_895;

const SATURATION: Range<f64> = 60.0..85.0;
const LIGHTNESS: Range<f64> = 55.0..70.0;

/// `count` distinct colors from the thread RNG.
pub fn generate_colors(count: usize) -> Vec<String> {
    generate_colors_seeded(count, None)
}

/// `count` distinct colors, reproducible when `seed` is set.
pub fn generate_colors_seeded(count: usize, seed: Option<u64>) -> Vec<String> {
    let mut rng: Box<dyn RngCore> = match seed {
        Some(s) => Box::new(StdRng::seed_from_u64(s)),
        None => Box::new(rand::rng()),
    };
    generate_colors_with(count, &mut rng)
}

/// `count` distinct colors drawn from `rng`.
pub fn generate_colors_with<R: Rng>(count: usize, rng: &mut R) -> Vec<String> {
    // More hue digits once the one-decimal wheel gets crowded.
    let precision = if count > 3_000 { 3 } else { 1 };

    let mut hue: f64 = rng.random();
    let mut seen: HashSet<String> = HashSet::with_capacity(count);
    let mut out: Vec<String> = Vec::with_capacity(count);
    while out.len() < count {
        let saturation = rng.random_range(SATURATION);
        let lightness = rng.random_range(LIGHTNESS);
        let color = format!(
            "hsl({:.*}, {:.0}%, {:.0}%)",
            precision,
            hue * 360.0,
            saturation,
            lightness
        );
        hue = (hue + GOLDEN_RATIO_CONJUGATE).fract();
        if seen.insert(color.clone()) {
            out.push(color);
        }
    }
    out
}

/// Stable mapping from category values to colors.
///
/// Categories keep first-appearance order, which is also the order colors are
/// handed out in.
#[derive(Debug, Clone, Default)]
pub struct CategoryPalette {
    categories: Vec<String>,
    colors: Vec<String>,
    index: HashMap<String, usize>,
}

impl CategoryPalette {
    /// Build a palette over the distinct values in `values`.
    pub fn from_values<I, S>(values: I, seed: Option<u64>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut categories: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for v in values {
            let v = v.as_ref();
            if !index.contains_key(v) {
                index.insert(v.to_owned(), categories.len());
                categories.push(v.to_owned());
            }
        }
        let colors = generate_colors_seeded(categories.len(), seed);
        Self {
            categories,
            colors,
            index,
        }
    }

    /// Color assigned to `category`.
    pub fn color_of(&self, category: &str) -> Option<&str> {
        self.index.get(category).map(|&i| self.colors[i].as_str())
    }

    /// Distinct categories, in first-appearance order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// `(category, color)` pairs in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.categories
            .iter()
            .map(String::as_str)
            .zip(self.colors.iter().map(String::as_str))
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the palette has no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

//! End-to-end map building: records in, render-ready geometry out.
//!
//! ```text
//! embeddings ─► PCA ─► points ─► estimate ─► DBSCAN ─► hulls
//!                                   (only when clusters are shown or colored)
//! ```
//!
//! Output is index-aligned with the input records and carries each record's id, so
//! the renderer never has to zip results back by hand. Colors follow
//! [`VisualizationConfig::color_by`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cluster::{
    estimate_dbscan_params_with, Clustering, ClusteringResult, Dbscan, DbscanParams,
    EstimatorParams,
};
use crate::color::CategoryPalette;
use crate::error::{Error, Result};
use crate::geometry::Point2D;
use crate::reduce::{Pca, PcaParams, Reducer};

/// Color of points that belong to no cluster.
pub const NOISE_COLOR: &str = "hsl(0, 0%, 45%)";

/// Color used when `color_by` is [`ColorBy::None`].
pub const NEUTRAL_COLOR: &str = "hsl(210, 15%, 70%)";

/// Category for records missing the selected field.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// One artwork's embedding plus the metadata it can be colored by.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    /// Opaque id, passed through to the output.
    pub id: String,
    /// Embedding vector.
    pub embedding: Vec<f32>,
    /// Artist name.
    #[serde(default)]
    pub artist: Option<String>,
    /// Year of creation.
    #[serde(default)]
    pub year: Option<i32>,
    /// Medium (oil, ink, ...).
    #[serde(default)]
    pub medium: Option<String>,
}

impl EmbeddingRecord {
    /// A record with no metadata.
    pub fn new(id: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            embedding,
            ..Default::default()
        }
    }

    /// Set the artist.
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// Set the year.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Set the medium.
    pub fn with_medium(mut self, medium: impl Into<String>) -> Self {
        self.medium = Some(medium.into());
        self
    }

    /// Category value for a metadata selector; `None` for cluster/none selectors.
    fn category(&self, by: ColorBy) -> Option<String> {
        let value = match by {
            ColorBy::Artist => self.artist.clone(),
            ColorBy::Year => self.year.map(|y| y.to_string()),
            ColorBy::Medium => self.medium.clone(),
            ColorBy::Cluster | ColorBy::None => return None,
        };
        Some(value.unwrap_or_else(|| UNKNOWN_CATEGORY.to_owned()))
    }
}

/// Which field drives point colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorBy {
    /// Color by artist.
    Artist,
    /// Color by year.
    Year,
    /// Color by medium.
    Medium,
    /// Color by DBSCAN cluster.
    #[default]
    Cluster,
    /// Single neutral color.
    None,
}

impl ColorBy {
    /// Selector name as used in configs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorBy::Artist => "artist",
            ColorBy::Year => "year",
            ColorBy::Medium => "medium",
            ColorBy::Cluster => "cluster",
            ColorBy::None => "none",
        }
    }
}

impl fmt::Display for ColorBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorBy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "artist" => Ok(ColorBy::Artist),
            "year" => Ok(ColorBy::Year),
            "medium" => Ok(ColorBy::Medium),
            "cluster" => Ok(ColorBy::Cluster),
            "none" => Ok(ColorBy::None),
            _ => Err(Error::UnknownColorBy(s.to_owned())),
        }
    }
}

/// Caller-facing switches for [`build_visualization`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VisualizationConfig {
    /// Compute clusters and their hulls.
    pub show_clusters: bool,
    /// Field that feeds the color assigner.
    pub color_by: ColorBy,
    /// Seed for all generated colors; `None` uses the thread RNG.
    pub color_seed: Option<u64>,
    /// Projection settings.
    pub reducer: PcaParams,
    /// Clustering parameter estimation settings.
    pub estimator: EstimatorParams,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            show_clusters: true,
            color_by: ColorBy::Cluster,
            color_seed: None,
            reducer: PcaParams::default(),
            estimator: EstimatorParams::default(),
        }
    }
}

/// A record placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    /// Record id.
    pub id: String,
    /// Position in the unit square.
    pub position: Point2D,
    /// Cluster id, when clustering ran and the point is not noise.
    pub cluster: Option<usize>,
    /// Display color.
    pub color: String,
}

/// Hull overlay for one cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterHull {
    /// Cluster id.
    pub cluster_id: usize,
    /// Cluster color.
    pub color: String,
    /// Counter-clockwise boundary, implicitly closed.
    pub polygon: Vec<Point2D>,
    /// Label anchor.
    pub centroid: Option<Point2D>,
}

/// One legend row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    /// Category or cluster name.
    pub label: String,
    /// Swatch color.
    pub color: String,
    /// Points in this category.
    pub count: usize,
}

/// Everything a renderer needs to draw the map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Visualization {
    /// Placed records, in input order.
    pub points: Vec<MapPoint>,
    /// Estimated DBSCAN parameters, when clustering ran.
    pub params: Option<DbscanParams>,
    /// Clustering output, when clustering ran.
    pub clustering: Option<ClusteringResult>,
    /// Hull per cluster, when clusters are shown.
    pub hulls: Vec<ClusterHull>,
    /// Legend for the active color mode.
    pub legend: Vec<LegendEntry>,
}

/// Project, cluster and color `records`.
///
/// Fails only on malformed embeddings (ragged or non-finite); degenerate inputs
/// produce a trivial map.
pub fn build_visualization(
    records: &[EmbeddingRecord],
    config: &VisualizationConfig,
) -> Result<Visualization> {
    let vectors: Vec<Vec<f32>> = records.iter().map(|r| r.embedding.clone()).collect();
    let positions = Pca::new(config.reducer.clone()).reduce(&vectors)?;

    let needs_clusters = config.show_clusters || config.color_by == ColorBy::Cluster;
    let (params, clustering) = if needs_clusters {
        let params = estimate_dbscan_params_with(&positions, &config.estimator);
        let mut dbscan = Dbscan::from_params(params);
        if let Some(seed) = config.color_seed {
            dbscan = dbscan.with_color_seed(seed);
        }
        (Some(params), Some(dbscan.fit(&positions)?))
    } else {
        (None, None)
    };

    let hulls = match (&clustering, config.show_clusters) {
        (Some(result), true) => result
            .clusters
            .iter()
            .map(|c| ClusterHull {
                cluster_id: c.id,
                color: c.color.clone(),
                polygon: c.hull(&positions),
                centroid: c.centroid(&positions),
            })
            .collect(),
        _ => Vec::new(),
    };

    let (colors, legend) = match config.color_by {
        ColorBy::Cluster => cluster_colors(records.len(), clustering.as_ref()),
        ColorBy::None => (vec![NEUTRAL_COLOR.to_owned(); records.len()], Vec::new()),
        by => category_colors(records, by, config.color_seed),
    };

    let points: Vec<MapPoint> = records
        .iter()
        .zip(positions)
        .zip(colors)
        .enumerate()
        .map(|(i, ((record, position), color))| MapPoint {
            id: record.id.clone(),
            position,
            cluster: clustering.as_ref().and_then(|c| c.cluster_of(i)),
            color,
        })
        .collect();

    debug!(
        records = records.len(),
        clusters = clustering.as_ref().map_or(0, ClusteringResult::n_clusters),
        hulls = hulls.len(),
        color_by = %config.color_by,
        "pipeline: visualization built"
    );

    Ok(Visualization {
        points,
        params,
        clustering,
        hulls,
        legend,
    })
}

fn cluster_colors(
    n: usize,
    clustering: Option<&ClusteringResult>,
) -> (Vec<String>, Vec<LegendEntry>) {
    let Some(result) = clustering else {
        return (vec![NOISE_COLOR.to_owned(); n], Vec::new());
    };

    let colors = (0..n)
        .map(|i| match result.cluster_of(i) {
            Some(c) => result.clusters[c].color.clone(),
            None => NOISE_COLOR.to_owned(),
        })
        .collect();

    let mut legend: Vec<LegendEntry> = result
        .clusters
        .iter()
        .map(|c| LegendEntry {
            label: format!("Cluster {}", c.id + 1),
            color: c.color.clone(),
            count: c.len(),
        })
        .collect();
    if !result.noise_points.is_empty() {
        legend.push(LegendEntry {
            label: "Noise".to_owned(),
            color: NOISE_COLOR.to_owned(),
            count: result.noise_points.len(),
        });
    }
    (colors, legend)
}

fn category_colors(
    records: &[EmbeddingRecord],
    by: ColorBy,
    seed: Option<u64>,
) -> (Vec<String>, Vec<LegendEntry>) {
    let categories: Vec<String> = records
        .iter()
        .map(|r| r.category(by).unwrap_or_else(|| UNKNOWN_CATEGORY.to_owned()))
        .collect();
    let palette = CategoryPalette::from_values(&categories, seed);

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for c in &categories {
        *counts.entry(c.as_str()).or_insert(0) += 1;
    }

    let colors = categories
        .iter()
        .map(|c| palette.color_of(c).unwrap_or(NEUTRAL_COLOR).to_owned())
        .collect();
    let legend = palette
        .iter()
        .map(|(label, color)| LegendEntry {
            label: label.to_owned(),
            color: color.to_owned(),
            count: counts.get(label).copied().unwrap_or(0),
        })
        .collect();
    (colors, legend)
}

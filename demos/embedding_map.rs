//! Project synthetic artwork embeddings, cluster them, and print the map.
//!
//! Run with `RUST_LOG=debug` to see the pipeline stages.

use embedmap::{build_visualization, ColorBy, EmbeddingRecord, VisualizationConfig};
use rand::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Three "styles" in a 128-d embedding space, plus a few stragglers.
    let mut rng = StdRng::seed_from_u64(7);
    let styles = ["ukiyo-e", "impressionism", "bauhaus"];
    let mut records = Vec::new();
    for (s, style) in styles.iter().enumerate() {
        for i in 0..15 {
            let mut v: Vec<f32> = (0..128).map(|_| rng.random::<f32>() * 0.4).collect();
            v[s * 3] += 8.0;
            records.push(
                EmbeddingRecord::new(format!("{style}-{i:02}"), v)
                    .with_medium(*style)
                    .with_year(1850 + (s * 40 + i) as i32),
            );
        }
    }
    for i in 0..4 {
        let v: Vec<f32> = (0..128).map(|_| rng.random::<f32>() * 6.0).collect();
        records.push(EmbeddingRecord::new(format!("straggler-{i}"), v));
    }

    let config = VisualizationConfig {
        color_seed: Some(42),
        ..Default::default()
    };
    let vis = match build_visualization(&records, &config) {
        Ok(vis) => vis,
        Err(e) => {
            eprintln!("failed to build map: {e}");
            std::process::exit(1);
        }
    };

    if let Some(params) = vis.params {
        println!("=== DBSCAN (eps={:.4}, min_pts={}) ===", params.eps, params.min_pts);
    }
    for p in &vis.points {
        let tag = match p.cluster {
            Some(c) => format!("cluster {c}"),
            None => "NOISE".to_string(),
        };
        println!(
            "  {:16} ({:5.3}, {:5.3}) => {:10} {}",
            p.id, p.position.x, p.position.y, tag, p.color
        );
    }

    println!("\n=== Hulls ===");
    for hull in &vis.hulls {
        println!("  cluster {}: {} vertices", hull.cluster_id, hull.polygon.len());
    }

    let by_medium = VisualizationConfig {
        show_clusters: false,
        color_by: ColorBy::Medium,
        color_seed: Some(42),
        ..Default::default()
    };
    if let Ok(vis) = build_visualization(&records, &by_medium) {
        println!("\n=== Legend (color_by = {}) ===", by_medium.color_by);
        for entry in &vis.legend {
            println!("  {:14} {:24} {}", entry.label, entry.color, entry.count);
        }
    }
}

// src/centrality/degree.rs
//! Degree-based centralities.

use super::MetricMap;
use crate::graph::PackageGraph;

/// In-degree normalized by `N - 1`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn in_degree_centrality(graph: &PackageGraph) -> MetricMap {
    let scale = scale(graph);
    collect(graph, |id| graph.in_degree(id) as f64 * scale)
}

/// Raw in-degree count.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn in_degree(graph: &PackageGraph) -> MetricMap {
    collect(graph, |id| graph.in_degree(id) as f64)
}

/// Out-degree normalized by `N - 1`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn out_degree_centrality(graph: &PackageGraph) -> MetricMap {
    let scale = scale(graph);
    collect(graph, |id| graph.out_degree(id) as f64 * scale)
}

#[allow(clippy::cast_precision_loss)]
fn scale(graph: &PackageGraph) -> f64 {
    match graph.node_count() {
        0 | 1 => 1.0,
        n => 1.0 / (n - 1) as f64,
    }
}

fn collect(graph: &PackageGraph, score: impl Fn(usize) -> f64) -> MetricMap {
    MetricMap::new(
        graph
            .keys()
            .enumerate()
            .map(|(id, key)| (key.clone(), score(id)))
            .collect(),
    )
}

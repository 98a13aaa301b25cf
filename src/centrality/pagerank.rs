// src/centrality/pagerank.rs
//! `PageRank` over the registry graph.

use super::{MetricMap, PageRankParams};
use crate::graph::PackageGraph;

/// Computes `PageRank` scores, iterating nodes in stable enumeration order.
///
/// Dangling nodes spread their mass uniformly. Iteration stops once the L1
/// change drops below `N * tolerance`, or after `max_iterations` with a warning.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute(graph: &PackageGraph, params: &PageRankParams) -> MetricMap {
    let n = graph.node_count();
    if n == 0 {
        return MetricMap::default();
    }

    let nf = n as f64;
    let out_degree: Vec<usize> = (0..n).map(|id| graph.out_degree(id)).collect();
    let mut ranks = vec![1.0 / nf; n];

    for iteration in 0..params.max_iterations {
        let next = iterate_once(graph, &ranks, &out_degree, params.damping);
        let delta: f64 = next.iter().zip(&ranks).map(|(a, b)| (a - b).abs()).sum();
        ranks = next;

        if delta < nf * params.tolerance {
            tracing::debug!("PageRank converged after {} iterations", iteration + 1);
            return into_metric(graph, ranks);
        }
    }

    tracing::warn!(
        "PageRank did not converge within {} iterations",
        params.max_iterations
    );
    into_metric(graph, ranks)
}

#[allow(clippy::cast_precision_loss)]
fn iterate_once(
    graph: &PackageGraph,
    ranks: &[f64],
    out_degree: &[usize],
    damping: f64,
) -> Vec<f64> {
    let n = ranks.len();
    let nf = n as f64;
    let mut next = vec![0.0; n];

    let dangling: f64 = (0..n)
        .filter(|&id| out_degree[id] == 0)
        .map(|id| ranks[id])
        .sum();

    for (source, &rank) in ranks.iter().enumerate() {
        if out_degree[source] == 0 {
            continue;
        }
        let share = damping * rank / out_degree[source] as f64;
        for (target, _) in graph.successors(source) {
            next[target] += share;
        }
    }

    let base = (1.0 - damping) / nf + damping * dangling / nf;
    for value in &mut next {
        *value += base;
    }

    normalize(&mut next);
    next
}

fn normalize(ranks: &mut [f64]) {
    let total: f64 = ranks.iter().sum();
    if total > 0.0 {
        for rank in ranks.iter_mut() {
            *rank /= total;
        }
    }
}

fn into_metric(graph: &PackageGraph, ranks: Vec<f64>) -> MetricMap {
    MetricMap::new(graph.keys().cloned().zip(ranks).collect())
}

// src/centrality/mod.rs
//! Centrality metrics over a graph snapshot and the ranking built from them.

pub mod degree;
pub mod pagerank;
pub mod ranking;

pub use ranking::{rank_and_bucket, RankedEntry};

use serde::{Deserialize, Serialize};

use crate::graph::{NodeKey, NodeKind, PackageGraph};

/// Metric that drives a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    #[default]
    Pagerank,
    InDegreeCentrality,
    InDegree,
    OutDegreeCentrality,
}

/// `PageRank` tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRankParams {
    pub damping: f64,
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for PageRankParams {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1.0e-6,
            max_iterations: 100,
        }
    }
}

/// Node scores in the graph's stable enumeration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricMap {
    entries: Vec<(NodeKey, f64)>,
}

impl MetricMap {
    #[must_use]
    pub fn new(entries: Vec<(NodeKey, f64)>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeKey, f64)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    #[must_use]
    pub fn get(&self, key: &NodeKey) -> Option<f64> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    /// Keeps only nodes of `kind`, preserving order.
    #[must_use]
    pub fn only(mut self, kind: NodeKind) -> Self {
        self.entries.retain(|(k, _)| k.kind == kind);
        self
    }
}

/// Computes metrics and rankings with fixed `PageRank` parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct CentralityEngine {
    params: PageRankParams,
}

impl CentralityEngine {
    #[must_use]
    pub fn new(params: PageRankParams) -> Self {
        Self { params }
    }

    #[must_use]
    pub fn pagerank(&self, graph: &PackageGraph) -> MetricMap {
        pagerank::compute(graph, &self.params)
    }

    #[must_use]
    pub fn compute(&self, graph: &PackageGraph, metric: Metric) -> MetricMap {
        match metric {
            Metric::Pagerank => self.pagerank(graph),
            Metric::InDegreeCentrality => degree::in_degree_centrality(graph),
            Metric::InDegree => degree::in_degree(graph),
            Metric::OutDegreeCentrality => degree::out_degree_centrality(graph),
        }
    }

    /// Ranks the package nodes of `graph` by `metric`.
    #[must_use]
    pub fn rank_packages(&self, graph: &PackageGraph, metric: Metric) -> Vec<RankedEntry> {
        let scores = self.compute(graph, metric).only(NodeKind::Package);
        rank_and_bucket(&scores)
    }
}

// src/config/types.rs
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::centrality::Metric;
use crate::graph::NodeKind;

/// Contents of `centrality.toml`. Every field has a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CentralityConfig {
    pub paths: PathsConfig,
    pub window: WindowConfig,
    pub graph: GraphConfig,
    pub rank: RankConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding `sorted_dependency_events_<N>.csv` files.
    pub events_dir: PathBuf,
    /// Root of the per-package trend logs.
    pub trend_dir: PathBuf,
    /// Checkpoint file.
    pub checkpoint: PathBuf,
    /// Optional ranking report (`package,YYYY-MM,rank`).
    pub report: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            events_dir: PathBuf::from("events"),
            trend_dir: PathBuf::from("trends"),
            checkpoint: PathBuf::from("checkpoint"),
            report: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// First month to process when no checkpoint exists (`YYYY-MM-DD`).
    pub initial_boundary: String,
    /// Last month to process; unbounded when absent.
    pub final_boundary: Option<String>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            initial_boundary: default_initial_boundary(),
            final_boundary: None,
        }
    }
}

fn default_initial_boundary() -> String {
    "2016-01-01".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub directed: bool,
    /// Node kinds that take part in the graph. Packages are always the subjects.
    pub targets: Vec<NodeKind>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            directed: true,
            targets: vec![NodeKind::Package],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    pub metric: Metric,
    pub damping: f64,
    pub tolerance: f64,
    pub max_iterations: usize,
    /// Rank only the dominant connected component.
    pub main_component_only: bool,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            metric: Metric::Pagerank,
            damping: 0.85,
            tolerance: 1.0e-6,
            max_iterations: 100,
            main_component_only: false,
        }
    }
}

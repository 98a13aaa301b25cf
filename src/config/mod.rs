// src/config/mod.rs
pub mod io;
pub mod types;

pub use self::types::{CentralityConfig, GraphConfig, PathsConfig, RankConfig, WindowConfig};

use chrono::NaiveDate;
use std::path::Path;

use crate::centrality::PageRankParams;
use crate::dates;
use crate::error::{CentralityError, Result};
use crate::graph::BuilderConfig;

impl CentralityConfig {
    /// Loads and validates configuration.
    ///
    /// # Errors
    /// Returns an error if the file is unreadable, malformed or invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = io::load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates configuration.
    ///
    /// # Errors
    /// Returns `Config` or `InvalidDate` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        let rank = &self.rank;
        if !(rank.damping > 0.0 && rank.damping < 1.0) {
            return Err(CentralityError::Config(format!(
                "damping must be in (0, 1), got {}",
                rank.damping
            )));
        }
        if rank.tolerance <= 0.0 || rank.max_iterations == 0 {
            return Err(CentralityError::Config(
                "tolerance and max_iterations must be positive".to_string(),
            ));
        }
        if self.graph.targets.is_empty() {
            return Err(CentralityError::Config(
                "graph.targets must name at least one node kind".to_string(),
            ));
        }

        let initial = self.initial_boundary()?;
        if let Some(last) = self.final_boundary()? {
            if last < initial {
                return Err(CentralityError::Config(format!(
                    "final boundary {last} precedes initial boundary {initial}"
                )));
            }
        }
        Ok(())
    }

    /// # Errors
    /// Returns `InvalidDate` if the configured value is not a date.
    pub fn initial_boundary(&self) -> Result<NaiveDate> {
        dates::parse_boundary(&self.window.initial_boundary)
    }

    /// # Errors
    /// Returns `InvalidDate` if the configured value is not a date.
    pub fn final_boundary(&self) -> Result<Option<NaiveDate>> {
        self.window
            .final_boundary
            .as_deref()
            .map(dates::parse_boundary)
            .transpose()
    }

    #[must_use]
    pub fn builder_config(&self) -> BuilderConfig {
        BuilderConfig {
            directed: self.graph.directed,
            targets: self.graph.targets.iter().copied().collect(),
        }
    }

    #[must_use]
    pub fn pagerank_params(&self) -> PageRankParams {
        PageRankParams {
            damping: self.rank.damping,
            tolerance: self.rank.tolerance,
            max_iterations: self.rank.max_iterations,
        }
    }
}

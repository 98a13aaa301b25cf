// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::centrality::Metric;

#[derive(Parser)]
#[command(
    name = "centrality",
    version,
    about = "Monthly centrality ranking of a package registry's dependency graph"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Configuration file (default: ./centrality.toml)
    #[arg(long, short, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process every month after the checkpoint and record trends
    Run {
        /// Stop after this month (overrides `window.final_boundary`)
        #[arg(long, value_name = "DATE")]
        until: Option<String>,
        /// Append ranking rows to this file (overrides `paths.report`)
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },
    /// Print the ranking as of a boundary without persisting anything
    Rank {
        /// Boundary date; normalized to the first of its month
        #[arg(long, value_name = "DATE")]
        until: String,
        #[arg(long, value_enum)]
        metric: Option<Metric>,
        #[arg(long, default_value = "20")]
        top: usize,
        #[arg(long)]
        json: bool,
    },
    /// Show the last completed month
    Checkpoint,
    /// Show the most recent trend records of a package
    Trend {
        package: String,
        #[arg(long, default_value = "5")]
        last: usize,
    },
}

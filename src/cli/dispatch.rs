// src/cli/dispatch.rs
//! Command dispatch logic extracted from the binary.

use std::path::Path;

use super::args::Commands;
use super::handlers::{handle_checkpoint, handle_rank, handle_run, handle_trend};
use crate::exit::CentralityExit;
use anyhow::Result;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(command: Commands, config: Option<&Path>) -> Result<CentralityExit> {
    match command {
        Commands::Run { until, report } => handle_run(config, until, report),
        Commands::Rank {
            until,
            metric,
            top,
            json,
        } => handle_rank(config, &until, metric, top, json),
        Commands::Checkpoint => handle_checkpoint(config),
        Commands::Trend { package, last } => handle_trend(config, &package, last),
    }
}

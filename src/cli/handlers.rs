// src/cli/handlers.rs
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::centrality::{CentralityEngine, Metric, RankedEntry};
use crate::checkpoint::CheckpointStore;
use crate::config::CentralityConfig;
use crate::dates;
use crate::events::EventReader;
use crate::exit::CentralityExit;
use crate::graph::ReplayOutcome;
use crate::pipeline::{self, MonthlyRun, StopReason};
use crate::trend::TrendTracker;

fn load_config(path: Option<&Path>) -> Result<CentralityConfig> {
    CentralityConfig::load(path).context("Failed to load configuration")
}

/// Runs the monthly batch.
///
/// # Errors
/// Returns error if configuration, replay or persistence fails.
pub fn handle_run(
    config_path: Option<&Path>,
    until: Option<String>,
    report: Option<PathBuf>,
) -> Result<CentralityExit> {
    let mut config = load_config(config_path)?;
    if until.is_some() {
        config.window.final_boundary = until;
    }
    if report.is_some() {
        config.paths.report = report;
    }

    let mut run = MonthlyRun::from_config(&config)?;
    let summary = run.run()?;

    for month in &summary.months {
        println!(
            "{} {:>8} ranked {:>8} tracked {:>6} declining",
            dates::month_label(month.boundary).cyan(),
            month.ranked,
            month.tracked,
            month.declining.to_string().yellow()
        );
    }

    let reason = match summary.stop {
        StopReason::SourceExhausted => "event source exhausted",
        StopReason::FinalBoundaryReached => "final boundary reached",
    };
    match summary.last_completed {
        Some(last) => println!(
            "{} processed {} months up to {} ({reason})",
            "✓".green().bold(),
            summary.months.len(),
            dates::month_label(last)
        ),
        None => println!("{} nothing to process ({reason})", "•".yellow()),
    }

    Ok(CentralityExit::Success)
}

/// Prints the ranking as of `until`.
///
/// # Errors
/// Returns error if the date is invalid or events cannot be read.
pub fn handle_rank(
    config_path: Option<&Path>,
    until: &str,
    metric: Option<Metric>,
    top: usize,
    json: bool,
) -> Result<CentralityExit> {
    let config = load_config(config_path)?;
    let boundary = dates::parse_boundary(until)?;
    let reader = EventReader::open(&config.paths.events_dir)?;

    let (graph, outcome) = pipeline::build_snapshot(reader, &config, boundary)?;
    if outcome == ReplayOutcome::Exhausted {
        eprintln!(
            "{} events end before {boundary}; ranking reflects all available events",
            "warning:".yellow()
        );
    }

    let engine = CentralityEngine::new(config.pagerank_params());
    let ranking = pipeline::rank_snapshot(
        &graph,
        &engine,
        metric.unwrap_or(config.rank.metric),
        config.rank.main_component_only,
    );
    let shown: Vec<&RankedEntry> = ranking.iter().take(top).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(CentralityExit::Success);
    }

    println!(
        "{} {} nodes, {} edges as of {}",
        "Graph:".bold(),
        graph.node_count(),
        graph.edge_count(),
        boundary
    );
    for entry in shown {
        println!(
            "{:>6}  {:<8} {:<40} {:.6e}",
            entry.index,
            format!("top{}", entry.bucket).dimmed(),
            entry.key.to_string(),
            entry.score
        );
    }
    Ok(CentralityExit::Success)
}

/// Prints the checkpoint state.
///
/// # Errors
/// Returns error if the checkpoint file is unreadable.
pub fn handle_checkpoint(config_path: Option<&Path>) -> Result<CentralityExit> {
    let config = load_config(config_path)?;
    let store = CheckpointStore::new(&config.paths.checkpoint, config.initial_boundary()?);

    match store.stored()? {
        Some(done) => println!(
            "Last completed month: {} (next: {})",
            dates::month_label(done).green(),
            dates::month_label(dates::next_month(done))
        ),
        None => println!(
            "No checkpoint at {}; first month will be {}",
            store.path().display(),
            dates::month_label(store.last_completed()?).yellow()
        ),
    }
    Ok(CentralityExit::Success)
}

/// Prints the tail of a package's trend log.
///
/// # Errors
/// Returns error if the log is unreadable or corrupt.
pub fn handle_trend(
    config_path: Option<&Path>,
    package: &str,
    last: usize,
) -> Result<CentralityExit> {
    let config = load_config(config_path)?;
    let tracker = TrendTracker::new(&config.paths.trend_dir);
    let records = tracker
        .tail(package, last)
        .with_context(|| format!("Failed to read trend log of {package}"))?;

    if records.is_empty() {
        println!("No trend records for {package}");
        return Ok(CentralityExit::Success);
    }

    println!("{} {}", "Trend:".bold(), package);
    for record in records {
        let streak = match record.decline_streak {
            Some(n) => format!("declining {n}").red().to_string(),
            None => String::new(),
        };
        let month = chrono::DateTime::from_timestamp(record.timestamp, 0)
            .map_or_else(|| record.timestamp.to_string(), |d| d.format("%Y-%m").to_string());
        println!("{month}  rank {:>8}  {streak}", record.rank);
    }
    Ok(CentralityExit::Success)
}

// src/pipeline.rs
//! The monthly batch loop.
//!
//! Resumption policy:
//! - the checkpoint advances after each month whose trend records and report
//!   rows are written;
//! - a source that runs out before a boundary ends the run, and that month is
//!   neither recorded nor checkpointed;
//! - a restart replays the event files from the start and resumes recording at
//!   the month after the checkpoint;
//! - a month that failed partway through is rerun in full, and packages whose
//!   log already holds that month are skipped.

use chrono::NaiveDate;

use crate::centrality::{CentralityEngine, Metric, RankedEntry};
use crate::checkpoint::CheckpointStore;
use crate::config::CentralityConfig;
use crate::dates;
use crate::error::Result;
use crate::events::{Event, EventReader};
use crate::graph::{queries, GraphBuilder, PackageGraph, ReplayOutcome, ReplayStats};
use crate::report::RankingReport;
use crate::trend::{self, Evaluation, TrendTracker};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// No events at or after the next boundary yet.
    SourceExhausted,
    /// The configured final boundary was processed.
    FinalBoundaryReached,
}

/// Figures for one processed month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSummary {
    pub boundary: NaiveDate,
    pub ranked: usize,
    pub tracked: usize,
    pub declining: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub months: Vec<MonthSummary>,
    pub last_completed: Option<NaiveDate>,
    pub stop: StopReason,
    pub stats: ReplayStats,
}

pub struct MonthlyRun<S> {
    builder: GraphBuilder<S>,
    engine: CentralityEngine,
    metric: Metric,
    main_component_only: bool,
    tracker: TrendTracker,
    checkpoint: CheckpointStore,
    report: Option<RankingReport>,
    final_boundary: Option<NaiveDate>,
}

impl MonthlyRun<EventReader> {
    /// Wires a run over the configured event directory.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or a file cannot be opened.
    pub fn from_config(config: &CentralityConfig) -> Result<Self> {
        let reader = EventReader::open(&config.paths.events_dir)?;
        Self::new(reader, config)
    }
}

impl<S> MonthlyRun<S>
where
    S: Iterator<Item = Result<Event>>,
{
    /// Wires a run over an arbitrary event source.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the report cannot be opened.
    pub fn new(source: S, config: &CentralityConfig) -> Result<Self> {
        config.validate()?;
        let report = config
            .paths
            .report
            .as_deref()
            .map(RankingReport::open)
            .transpose()?;

        Ok(Self {
            builder: GraphBuilder::new(source, &config.builder_config()),
            engine: CentralityEngine::new(config.pagerank_params()),
            metric: config.rank.metric,
            main_component_only: config.rank.main_component_only,
            tracker: TrendTracker::new(&config.paths.trend_dir),
            checkpoint: CheckpointStore::new(
                &config.paths.checkpoint,
                config.initial_boundary()?,
            ),
            report,
            final_boundary: config.final_boundary()?,
        })
    }

    #[must_use]
    pub fn graph(&self) -> &PackageGraph {
        self.builder.graph()
    }

    /// Processes months until the source is exhausted or the final boundary is done.
    ///
    /// # Errors
    /// Propagates replay, persistence and checkpoint errors; all are fatal.
    pub fn run(&mut self) -> Result<RunSummary> {
        let mut boundary = match self.checkpoint.stored()? {
            Some(done) => {
                tracing::info!("Resuming after checkpoint {done}");
                dates::next_month(done)
            }
            None => self.checkpoint.last_completed()?,
        };

        let mut months = Vec::new();
        let stop = loop {
            if self.final_boundary.is_some_and(|last| boundary > last) {
                break StopReason::FinalBoundaryReached;
            }

            match self.builder.replay_until(boundary)? {
                ReplayOutcome::Exhausted => {
                    tracing::info!("Events exhausted before {boundary}; month left open");
                    break StopReason::SourceExhausted;
                }
                ReplayOutcome::BoundaryReached => {
                    months.push(self.process_month(boundary)?);
                    self.checkpoint.advance(boundary)?;
                    boundary = dates::next_month(boundary);
                }
            }
        };

        let stats = self.builder.stats();
        tracing::info!(
            "Run finished: {} months, {} events applied, {} dropped, {} missing deletes",
            months.len(),
            stats.applied,
            stats.dropped,
            stats.missing_deletes
        );

        Ok(RunSummary {
            last_completed: months.last().map(|m: &MonthSummary| m.boundary),
            months,
            stop,
            stats,
        })
    }

    fn process_month(&mut self, boundary: NaiveDate) -> Result<MonthSummary> {
        let ranking = rank_snapshot(
            self.builder.graph(),
            &self.engine,
            self.metric,
            self.main_component_only,
        );
        let timestamp = dates::epoch_seconds(boundary);

        let mut tracked = 0;
        let mut declining = 0;
        for entry in &ranking {
            if !trend::is_tracked_name(&entry.key.name) {
                continue;
            }
            let outcome = self
                .tracker
                .record(&entry.key.name, timestamp, entry.index as u64)?;
            tracked += 1;
            if matches!(outcome.evaluation, Evaluation::Evaluated { streak, .. } if streak > 0) {
                declining += 1;
            }
        }

        if let Some(report) = self.report.as_mut() {
            report.write_month(boundary, &ranking)?;
        }

        tracing::info!(
            "{}: ranked {} packages, {tracked} tracked, {declining} declining",
            dates::month_label(boundary),
            ranking.len()
        );

        Ok(MonthSummary {
            boundary,
            ranked: ranking.len(),
            tracked,
            declining,
        })
    }
}

/// Ranks the packages of `graph`, optionally restricted to its main component.
#[must_use]
pub fn rank_snapshot(
    graph: &PackageGraph,
    engine: &CentralityEngine,
    metric: Metric,
    main_component_only: bool,
) -> Vec<RankedEntry> {
    if main_component_only {
        let core = queries::main_component(graph);
        engine.rank_packages(&graph.subgraph(&core), metric)
    } else {
        engine.rank_packages(graph, metric)
    }
}

/// Builds the graph as of `until` without touching any persisted state.
///
/// # Errors
/// Propagates source errors.
pub fn build_snapshot<S>(
    source: S,
    config: &CentralityConfig,
    until: NaiveDate,
) -> Result<(PackageGraph, ReplayOutcome)>
where
    S: Iterator<Item = Result<Event>>,
{
    let mut builder = GraphBuilder::new(source, &config.builder_config());
    let outcome = builder.replay_until(until)?;
    Ok((builder.into_graph(), outcome))
}

// src/trend/mod.rs
//! Per-package rank history and decline detection.
//!
//! Every processed month appends `(timestamp, rank, decline_streak)` to the
//! package's log. The streak grows by one each month in which the last six
//! ranks (five stored plus the new one) show a significant worsening trend,
//! and resets otherwise.

pub mod record;
pub mod regression;
pub mod store;

pub use record::TrendRecord;
pub use regression::{linear_regression, Regression};
pub use store::TrendStore;

use std::path::PathBuf;

use crate::error::Result;
use crate::graph::names;

/// Stored records needed before a decline can be evaluated.
pub const PRIOR_RECORDS: usize = 5;

/// Slope p-value below which a worsening trend counts.
pub const SIGNIFICANCE: f64 = 0.001;

/// Result of the decline check for one new observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    /// Fewer than `PRIOR_RECORDS` stored records.
    InsufficientHistory { priors: usize },
    Evaluated {
        streak: u32,
        slope: f64,
        p_value: f64,
    },
}

impl Evaluation {
    /// The streak, if one was computed. `Some(0)` means evaluated, no decline.
    #[must_use]
    pub fn streak(&self) -> Option<u32> {
        match self {
            Self::InsufficientHistory { .. } => None,
            Self::Evaluated { streak, .. } => Some(*streak),
        }
    }
}

/// A record as written plus the evaluation that produced its streak.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordOutcome {
    pub record: TrendRecord,
    pub evaluation: Evaluation,
}

pub struct TrendTracker {
    store: TrendStore,
}

impl TrendTracker {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            store: TrendStore::new(root),
        }
    }

    #[must_use]
    pub fn store(&self) -> &TrendStore {
        &self.store
    }

    /// Appends this month's rank for `package` and updates its decline streak.
    ///
    /// A log whose last record is already at or past `timestamp` is left
    /// untouched, so a month that failed partway through can be rerun. The
    /// stored record and its evaluation are returned instead.
    ///
    /// # Errors
    /// Returns an error if the log cannot be read or appended.
    pub fn record(&self, package: &str, timestamp: i64, rank: u64) -> Result<RecordOutcome> {
        let history = self.store.tail(package, PRIOR_RECORDS + 1)?;
        if let Some((last, earlier)) = history.split_last() {
            if last.timestamp >= timestamp {
                tracing::debug!("{package} already recorded at {}", last.timestamp);
                return Ok(RecordOutcome {
                    record: *last,
                    evaluation: evaluate(earlier, last.timestamp, last.rank),
                });
            }
        }

        let priors = &history[history.len().saturating_sub(PRIOR_RECORDS)..];
        let evaluation = evaluate(priors, timestamp, rank);
        let record = TrendRecord {
            timestamp,
            rank,
            decline_streak: evaluation.streak().filter(|&s| s > 0),
        };

        self.store.append(package, &record)?;
        if let Some(streak) = record.decline_streak {
            tracing::debug!("{package} in decline for {streak} consecutive months");
        }

        Ok(RecordOutcome { record, evaluation })
    }

    /// The last `n` stored records of `package`, oldest first.
    ///
    /// # Errors
    /// Returns an error if the log cannot be read or is corrupt.
    pub fn tail(&self, package: &str, n: usize) -> Result<Vec<TrendRecord>> {
        self.store.tail(package, n)
    }
}

/// Decides the streak for a new `(timestamp, rank)` given the stored priors.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn evaluate(priors: &[TrendRecord], timestamp: i64, rank: u64) -> Evaluation {
    if priors.len() < PRIOR_RECORDS {
        return Evaluation::InsufficientHistory {
            priors: priors.len(),
        };
    }

    let window = &priors[priors.len() - PRIOR_RECORDS..];
    let previous = window.last().and_then(|r| r.decline_streak).unwrap_or(0);

    let points: Vec<(f64, f64)> = window
        .iter()
        .map(|r| (r.timestamp as f64, r.rank as f64))
        .chain(std::iter::once((timestamp as f64, rank as f64)))
        .collect();

    let Some(fit) = linear_regression(&points) else {
        return Evaluation::Evaluated {
            streak: 0,
            slope: 0.0,
            p_value: 1.0,
        };
    };

    let declining = fit.slope > 0.0 && fit.p_value < SIGNIFICANCE;
    Evaluation::Evaluated {
        streak: if declining { previous + 1 } else { 0 },
        slope: fit.slope,
        p_value: fit.p_value,
    }
}

/// Only valid, all-lowercase package names get trend logs.
#[must_use]
pub fn is_tracked_name(package: &str) -> bool {
    names::is_valid_package_name(package) && !package.chars().any(char::is_uppercase)
}

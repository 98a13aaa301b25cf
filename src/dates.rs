// src/dates.rs
//! Month-boundary arithmetic shared by replay, checkpointing and trend records.

use chrono::{Datelike, Months, NaiveDate};

use crate::error::{CentralityError, Result};

/// Format used for boundaries on disk and on the command line.
pub const BOUNDARY_FORMAT: &str = "%Y-%m-%d";

/// Returns the first day of the month containing `date`.
#[must_use]
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Returns the first day of the month following the one containing `date`.
#[must_use]
pub fn next_month(date: NaiveDate) -> NaiveDate {
    let start = month_start(date);
    start.checked_add_months(Months::new(1)).unwrap_or(start)
}

/// Parses a `YYYY-MM-DD` (or longer ISO-8601) string, looking only at the day part.
///
/// # Errors
/// Returns `InvalidDate` when the first ten characters are not a calendar date.
pub fn parse_day(value: &str) -> Result<NaiveDate> {
    let day = value.get(..10).ok_or_else(|| CentralityError::InvalidDate {
        value: value.to_string(),
        reason: "too short".to_string(),
    })?;

    NaiveDate::parse_from_str(day, BOUNDARY_FORMAT).map_err(|e| CentralityError::InvalidDate {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Parses a boundary and normalizes it to the first of its month.
///
/// # Errors
/// Returns `InvalidDate` if the value is not a date.
pub fn parse_boundary(value: &str) -> Result<NaiveDate> {
    parse_day(value.trim()).map(month_start)
}

/// UTC epoch seconds at midnight of `date`.
#[must_use]
pub fn epoch_seconds(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map_or(0, |dt| dt.and_utc().timestamp())
}

/// `YYYY-MM` label used in ranking reports.
#[must_use]
pub fn month_label(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

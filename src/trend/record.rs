// src/trend/record.rs
//! Line format of the per-package trend log: `timestamp,rank,decline_streak`.

use std::fmt;

/// One month of a package's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendRecord {
    /// Epoch seconds of the month boundary.
    pub timestamp: i64,
    /// 1-based rank position.
    pub rank: u64,
    /// Length of the current decline streak; `None` when not in a streak.
    pub decline_streak: Option<u32>,
}

impl TrendRecord {
    /// Parses a log line (without its newline). Returns `None` if malformed.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let mut fields = line.trim_end_matches('\r').split(',');
        let timestamp = fields.next()?.parse().ok()?;
        let rank = fields.next()?.parse().ok()?;
        let streak = fields.next()?;
        if fields.next().is_some() {
            return None;
        }

        let decline_streak = if streak.is_empty() {
            None
        } else {
            Some(streak.parse().ok()?)
        };

        Some(Self {
            timestamp,
            rank,
            decline_streak,
        })
    }
}

impl fmt::Display for TrendRecord {
    /// Renders the log line without its newline; a zero streak is left empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},", self.timestamp, self.rank)?;
        match self.decline_streak {
            Some(streak) if streak > 0 => write!(f, "{streak}"),
            _ => Ok(()),
        }
    }
}

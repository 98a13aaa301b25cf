// src/events/mod.rs
//! Registry mutation events and the on-disk event source.
//!
//! Each event records one relation of a package version being added or removed
//! (a dependency, a dev dependency, a maintainer, a keyword or a license).
//! Events arrive in non-decreasing date order.

pub mod parse;
pub mod reader;

pub use parse::{parse_line, EventParseError};
pub use reader::{list_event_files, EventReader};

use chrono::NaiveDate;
use std::fmt;

use crate::dates;
use crate::error::Result;

/// Whether a relation appeared or disappeared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Add,
    Delete,
}

impl Action {
    /// Parses the collector's action code (`a`/`d`) or its spelled-out form.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "a" | "add" => Some(Self::Add),
            "d" | "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

/// The kind of relation an event mutates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    Dependency,
    DevDependency,
    Maintainer,
    Keyword,
    License,
}

impl RelationKind {
    /// Parses the collector's relation code (`p`, `d`, `m`, `k`, `l`) or a long name.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "p" | "dependency" | "dependencies" => Some(Self::Dependency),
            "d" | "devDependency" | "devDependencies" => Some(Self::DevDependency),
            "m" | "maintainer" | "maintainers" => Some(Self::Maintainer),
            "k" | "keyword" | "keywords" => Some(Self::Keyword),
            "l" | "license" => Some(Self::License),
            _ => None,
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dependency => "dependency",
            Self::DevDependency => "devDependency",
            Self::Maintainer => "maintainer",
            Self::Keyword => "keyword",
            Self::License => "license",
        };
        f.write_str(name)
    }
}

/// A single timestamped mutation read from the event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub subject: String,
    pub version: String,
    /// Raw ISO-8601 timestamp as written by the collector.
    pub date: String,
    /// Day part of `date`; replay boundaries compare against this.
    pub day: NaiveDate,
    pub action: Action,
    pub relation: RelationKind,
    pub object: String,
}

impl Event {
    /// Builds an event, deriving its day from the ISO-8601 `date`.
    ///
    /// # Errors
    /// Returns `InvalidDate` if `date` does not start with `YYYY-MM-DD`.
    pub fn new(
        subject: impl Into<String>,
        version: impl Into<String>,
        date: impl Into<String>,
        action: Action,
        relation: RelationKind,
        object: impl Into<String>,
    ) -> Result<Self> {
        let date = date.into();
        let day = dates::parse_day(&date)?;
        Ok(Self {
            subject: subject.into(),
            version: version.into(),
            date,
            day,
            action,
            relation,
            object: object.into(),
        })
    }
}

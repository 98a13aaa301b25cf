// src/events/parse.rs
//! Tokenization of event log lines.
//!
//! A line holds six comma-separated fields:
//! `subject,version,date,action,relation,object`. Only the first five commas
//! delimit; the object keeps any further commas verbatim.

use thiserror::Error;

use super::{Action, Event, RelationKind};

const FIELD_COUNT: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventParseError {
    #[error("expected 6 fields, found {0}")]
    FieldCount(usize),

    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("unknown relation '{0}'")]
    UnknownRelation(String),

    #[error("bad date '{0}'")]
    BadDate(String),
}

/// Parses one event line (without its trailing newline).
///
/// # Errors
/// Returns an `EventParseError` describing the first malformed field.
pub fn parse_line(line: &str) -> Result<Event, EventParseError> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let fields: Vec<&str> = line.splitn(FIELD_COUNT, ',').collect();

    let &[subject, version, date, action, relation, object] = fields.as_slice() else {
        return Err(EventParseError::FieldCount(fields.len()));
    };

    let action =
        Action::from_code(action).ok_or_else(|| EventParseError::UnknownAction(action.into()))?;
    let relation = RelationKind::from_code(relation)
        .ok_or_else(|| EventParseError::UnknownRelation(relation.into()))?;

    Event::new(subject, version, date, action, relation, object)
        .map_err(|_| EventParseError::BadDate(date.into()))
}

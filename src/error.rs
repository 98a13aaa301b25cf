// src/error.rs
use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CentralityError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    /// The carried-over event already sits at or past the requested boundary.
    #[error("No events to cover boundary {boundary}: pending event is dated {pending}")]
    BoundaryNotAdvanced {
        boundary: NaiveDate,
        pending: NaiveDate,
    },

    #[error("Checkpoint already at {0}: refusing to advance to the same boundary")]
    CheckpointNotAdvanced(NaiveDate),

    #[error("Invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("Corrupt trend log {path} at line '{line}'")]
    CorruptTrendLog { path: PathBuf, line: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, CentralityError>;

impl CentralityError {
    /// Wraps an I/O error with the path that produced it.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        CentralityError::Io {
            source,
            path: path.into(),
        }
    }
}

// Allow `?` on std::io::Error by converting to CentralityError::Io with unknown path.
impl From<std::io::Error> for CentralityError {
    fn from(source: std::io::Error) -> Self {
        CentralityError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

impl From<toml::de::Error> for CentralityError {
    fn from(e: toml::de::Error) -> Self {
        CentralityError::Config(e.to_string())
    }
}

// src/checkpoint.rs
//! The last fully processed month boundary, persisted as `YYYY-MM-01`.

use chrono::NaiveDate;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::dates::{self, BOUNDARY_FORMAT};
use crate::error::{CentralityError, Result};

pub struct CheckpointStore {
    path: PathBuf,
    initial: NaiveDate,
}

impl CheckpointStore {
    /// `initial` is reported by `last_completed` until a value has been stored.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, initial: NaiveDate) -> Self {
        Self {
            path: path.into(),
            initial: dates::month_start(initial),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored boundary, if any.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn stored(&self) -> Result<Option<NaiveDate>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => dates::parse_boundary(&content).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CentralityError::io(e, &self.path)),
        }
    }

    /// The stored boundary, or the configured initial boundary.
    ///
    /// # Errors
    /// Returns an error if the stored value cannot be read.
    pub fn last_completed(&self) -> Result<NaiveDate> {
        Ok(self.stored()?.unwrap_or(self.initial))
    }

    /// Records `boundary` as fully processed.
    ///
    /// # Errors
    /// Returns `CheckpointNotAdvanced` if `boundary` is already the stored value,
    /// or an I/O error if the write fails.
    pub fn advance(&self, boundary: NaiveDate) -> Result<()> {
        let boundary = dates::month_start(boundary);
        if self.stored()? == Some(boundary) {
            return Err(CentralityError::CheckpointNotAdvanced(boundary));
        }

        atomic_write(&self.path, &format!("{}\n", boundary.format(BOUNDARY_FORMAT)))?;
        tracing::info!("Checkpoint advanced to {boundary}");
        Ok(())
    }
}

fn atomic_write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CentralityError::io(e, parent))?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| CentralityError::io(e, &temp_path))?;
    fs::rename(&temp_path, path).map_err(|e| CentralityError::io(e, path))?;
    Ok(())
}

// src/report.rs
//! Ranking report sink: one `package,YYYY-MM,rank` row per ranked package.

use chrono::NaiveDate;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::centrality::RankedEntry;
use crate::dates;
use crate::error::{CentralityError, Result};

pub struct RankingReport {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl RankingReport {
    /// Opens the report for appending, creating it if needed.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| CentralityError::io(e, parent))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| CentralityError::io(e, path))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    /// Appends and flushes the rows of one month.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_month(&mut self, boundary: NaiveDate, ranking: &[RankedEntry]) -> Result<()> {
        let label = dates::month_label(boundary);
        for entry in ranking {
            writeln!(self.writer, "{},{label},{}", entry.key.name, entry.index)
                .map_err(|e| CentralityError::io(e, &self.path))?;
        }
        self.writer
            .flush()
            .map_err(|e| CentralityError::io(e, &self.path))?;
        Ok(())
    }
}

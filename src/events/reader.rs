// src/events/reader.rs
//! Lazy, ordered event source over a directory of event files.
//!
//! Files named `sorted_dependency_events_<N>.csv` are read in ascending `N`.
//! The reader has no seek: resuming means re-opening from the first file.

use regex::Regex;
use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use super::{parse_line, Event};
use crate::error::{CentralityError, Result};

pub const FILE_PREFIX: &str = "sorted_dependency_events_";
pub const FILE_SUFFIX: &str = ".csv";

/// Lists the event files of `dir` in ascending sequence order.
///
/// # Errors
/// Returns an error if the directory cannot be read.
pub fn list_event_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = Regex::new(&format!(
        "^{}(\\d+){}$",
        regex::escape(FILE_PREFIX),
        regex::escape(FILE_SUFFIX)
    ))?;

    let entries = fs::read_dir(dir).map_err(|e| CentralityError::io(e, dir))?;
    let mut numbered = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| CentralityError::io(e, dir))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let Some(seq) = pattern
            .captures(name)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u64>().ok())
        else {
            continue;
        };
        numbered.push((seq, entry.path()));
    }

    numbered.sort_by_key(|(seq, _)| *seq);
    Ok(numbered.into_iter().map(|(_, path)| path).collect())
}

struct OpenFile {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    line_no: usize,
}

/// Streams events from an ordered list of files.
pub struct EventReader {
    pending_files: VecDeque<PathBuf>,
    current: Option<OpenFile>,
    malformed: usize,
}

impl EventReader {
    /// Opens every event file found in `dir`.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be listed.
    pub fn open(dir: &Path) -> Result<Self> {
        let files = list_event_files(dir)?;
        tracing::info!("Found {} event files in {}", files.len(), dir.display());
        Ok(Self::from_files(files))
    }

    /// Reads the given files in the given order.
    #[must_use]
    pub fn from_files(files: Vec<PathBuf>) -> Self {
        Self {
            pending_files: files.into(),
            current: None,
            malformed: 0,
        }
    }

    /// Number of lines skipped because they could not be parsed.
    #[must_use]
    pub fn malformed(&self) -> usize {
        self.malformed
    }

    fn open_next(&mut self) -> Result<bool> {
        let Some(path) = self.pending_files.pop_front() else {
            return Ok(false);
        };
        tracing::debug!("Reading events from {}", path.display());
        let file = File::open(&path).map_err(|e| CentralityError::io(e, &path))?;
        self.current = Some(OpenFile {
            path,
            lines: BufReader::new(file).lines(),
            line_no: 0,
        });
        Ok(true)
    }
}

impl Iterator for EventReader {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current.is_none() {
                match self.open_next() {
                    Ok(true) => {}
                    Ok(false) => return None,
                    Err(e) => return Some(Err(e)),
                }
            }

            let open = self.current.as_mut()?;
            let Some(line) = open.lines.next() else {
                self.current = None;
                continue;
            };
            open.line_no += 1;

            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(CentralityError::io(e, &open.path))),
            };
            if line.trim().is_empty() {
                continue;
            }

            match parse_line(&line) {
                Ok(event) => return Some(Ok(event)),
                Err(e) => {
                    tracing::warn!(
                        "Skipping malformed event at {}:{}: {e}",
                        open.path.display(),
                        open.line_no
                    );
                    self.malformed += 1;
                }
            }
        }
    }
}

// src/trend/store.rs
//! On-disk layout of the trend logs and bounded tail reads.
//!
//! `left-pad` lives at `<root>/left-pad.csv`, `@babel/core` at
//! `<root>/@babel/core.csv`. Logs are only ever appended to. Reading the tail
//! walks backward from the end in fixed-size chunks until enough complete lines
//! are buffered, so the cost does not grow with the length of the history.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

use super::record::TrendRecord;
use crate::error::{CentralityError, Result};
use crate::graph::names;

const TAIL_CHUNK: u64 = 256;
const LOG_EXTENSION: &str = "csv";

#[derive(Debug, Clone)]
pub struct TrendStore {
    root: PathBuf,
}

impl TrendStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of a package's log.
    #[must_use]
    pub fn path_for(&self, package: &str) -> PathBuf {
        match names::scoped_parts(package) {
            Some((scope, name)) => self
                .root
                .join(format!("@{scope}"))
                .join(format!("{name}.{LOG_EXTENSION}")),
            None => self.root.join(format!("{package}.{LOG_EXTENSION}")),
        }
    }

    /// Appends one record to the package's log, creating it if needed.
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be written.
    pub fn append(&self, package: &str, record: &TrendRecord) -> Result<()> {
        let path = self.path_for(package);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| CentralityError::io(e, parent))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| CentralityError::io(e, &path))?;
        writeln!(file, "{record}").map_err(|e| CentralityError::io(e, &path))?;
        Ok(())
    }

    /// The last `n` records of the package's log, oldest first.
    ///
    /// A package without a log has an empty tail.
    ///
    /// # Errors
    /// Returns an error on read failure or if a tail line is malformed.
    pub fn tail(&self, package: &str, n: usize) -> Result<Vec<TrendRecord>> {
        let path = self.path_for(package);
        let mut file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(CentralityError::io(e, &path)),
        };

        let lines = read_tail_lines(&mut file, n).map_err(|e| CentralityError::io(e, &path))?;
        lines
            .iter()
            .map(|line| {
                TrendRecord::parse(line).ok_or_else(|| CentralityError::CorruptTrendLog {
                    path: path.clone(),
                    line: line.clone(),
                })
            })
            .collect()
    }
}

/// Reads the last `n` non-empty lines of `file`, oldest first.
fn read_tail_lines(file: &mut File, n: usize) -> io::Result<Vec<String>> {
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut pos = file.seek(SeekFrom::End(0))?;
    let mut buf: Vec<u8> = Vec::new();

    // n complete lines need n + 1 newlines once the final one is counted.
    while pos > 0 && newline_count(&buf) <= n {
        let step = TAIL_CHUNK.min(pos);
        pos -= step;
        file.seek(SeekFrom::Start(pos))?;

        let mut chunk = vec![0u8; usize::try_from(step).unwrap_or(0)];
        file.read_exact(&mut chunk)?;
        chunk.extend_from_slice(&buf);
        buf = chunk;
    }

    let text = String::from_utf8_lossy(&buf);
    let mut segments: Vec<&str> = text.split('\n').collect();
    if pos > 0 && !segments.is_empty() {
        // Started mid-line.
        segments.remove(0);
    }

    let lines: Vec<String> = segments
        .into_iter()
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect();
    let skip = lines.len().saturating_sub(n);
    Ok(lines.into_iter().skip(skip).collect())
}

fn newline_count(buf: &[u8]) -> usize {
    buf.iter().filter(|&&b| b == b'\n').count()
}

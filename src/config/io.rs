// src/config/io.rs
use std::fs;
use std::io;
use std::path::Path;

use super::types::CentralityConfig;
use crate::error::{CentralityError, Result};

pub const CONFIG_FILE: &str = "centrality.toml";

/// Reads `path`, or `centrality.toml` in the working directory when `None`.
///
/// A missing default file yields the defaults; a missing explicit file is an error.
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load(path: Option<&Path>) -> Result<CentralityConfig> {
    let (path, explicit) = match path {
        Some(p) => (p, true),
        None => (Path::new(CONFIG_FILE), false),
    };

    match fs::read_to_string(path) {
        Ok(content) => parse(&content),
        Err(e) if e.kind() == io::ErrorKind::NotFound && !explicit => {
            tracing::debug!("No {CONFIG_FILE} found, using defaults");
            Ok(CentralityConfig::default())
        }
        Err(e) => Err(CentralityError::io(e, path)),
    }
}

/// Parses TOML configuration text.
///
/// # Errors
/// Returns `Config` if the text is not a valid configuration.
pub fn parse(content: &str) -> Result<CentralityConfig> {
    Ok(toml::from_str(content)?)
}

//! TOML session file parsing

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Raw session values as they appear in a TOML file
///
/// Every field is optional; missing values fall back to CLI flags and
/// then to the built-in defaults. `max_pending_ops` keeps the raw signed
/// convention where zero or negative means unlimited.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionFile {
    pub num_messages: Option<usize>,
    pub message_size: Option<usize>,
    pub persistent: Option<bool>,
    pub max_pending_ops: Option<i64>,
    pub max_distinct_objects: Option<u64>,
    pub random_payload: Option<bool>,
}

/// Parse a TOML session file
pub fn parse_session_file(path: &Path) -> Result<SessionFile> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_session_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML session values from a string
pub fn parse_session_str(contents: &str) -> Result<SessionFile> {
    ::toml::from_str(contents).context("Failed to parse TOML session configuration")
}

//! Reading the optional `.env` file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::dotenv::{ConfigEntry, parse_entries};

/// Read `path` into `.env` entries.
///
/// A missing file is not an error and yields no entries.
pub fn read_env_file(path: &Path) -> Result<Vec<ConfigEntry>> {
    if !path.exists() {
        debug!(path = %path.display(), "no env file");
        return Ok(Vec::new());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let entries = parse_entries(&contents);
    debug!(path = %path.display(), entries = entries.len(), "read env file");
    Ok(entries)
}

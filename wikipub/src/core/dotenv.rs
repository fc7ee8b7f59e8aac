//! Line parser for `.env`-style `KEY=VALUE` files.

/// One `KEY=VALUE` line from a `.env` file, value not yet normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub key: String,
    pub raw_value: String,
}

impl ConfigEntry {
    pub fn new(key: impl Into<String>, raw_value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            raw_value: raw_value.into(),
        }
    }
}

/// Parse `.env` contents into entries, in file order.
///
/// Blank lines and lines whose first non-whitespace character is `#` are
/// skipped. The key is everything before the first `=`, the raw value
/// everything after it. A line with no `=` at all becomes a key with an empty
/// value rather than an error. A leading byte-order mark is ignored.
pub fn parse_entries(contents: &str) -> Vec<ConfigEntry> {
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
    contents.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<ConfigEntry> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let (key, raw_value) = match trimmed.split_once('=') {
        Some((key, value)) => (key, value),
        None => (trimmed, ""),
    };
    Some(ConfigEntry::new(strip_export(key.trim()), raw_value))
}

fn strip_export(key: &str) -> &str {
    key.strip_prefix("export")
        .filter(|rest| rest.starts_with(char::is_whitespace))
        .map(str::trim_start)
        .unwrap_or(key)
}

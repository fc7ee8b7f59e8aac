//! Explicit environment handed to the external tool.
//!
//! The ambient process environment is captured once into an [`Environment`]
//! value, `.env` entries are merged into it, and the result is passed to the
//! child verbatim. The real process environment is never modified.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};

use crate::core::dotenv::ConfigEntry;
use crate::core::normalize::normalize_value;

/// Variable name to value mapping, ordered for deterministic iteration.
///
/// Names are case-insensitive on Windows (`Path` and `PATH` are one
/// variable), so keys are stored uppercased there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<OsString, OsString>,
}

/// What [`Environment::materialize`] did with each `.env` entry.
///
/// Keys are listed in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeSummary {
    /// Keys whose file value was written into the environment.
    pub applied: Vec<String>,
    /// Keys left alone because a non-empty value was already present.
    pub kept: Vec<String>,
    /// Keys that cannot name an environment variable (empty, or containing
    /// `=` or NUL).
    pub rejected: Vec<String>,
}

impl Environment {
    /// Snapshot the current process environment.
    pub fn capture() -> Self {
        std::env::vars_os().collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_os(key).and_then(OsStr::to_str)
    }

    pub fn get_os(&self, key: &str) -> Option<&OsStr> {
        self.vars
            .get(&env_key(OsStr::new(key)))
            .map(OsString::as_os_str)
    }

    /// True when `key` is present with a non-empty value.
    pub fn is_set(&self, key: &str) -> bool {
        self.get_os(key).is_some_and(|value| !value.is_empty())
    }

    pub fn set(&mut self, key: impl Into<OsString>, value: impl Into<OsString>) {
        let key: OsString = key.into();
        self.vars.insert(env_key(&key), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<OsString> {
        self.vars.remove(&env_key(OsStr::new(key)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars
            .iter()
            .map(|(key, value)| (key.as_os_str(), value.as_os_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Merge `.env` entries, in order, without overriding existing values.
    ///
    /// An entry is applied only while its key is unset or empty, so ambient
    /// values always win and the first non-empty file value wins over later
    /// duplicates.
    pub fn materialize(&mut self, entries: &[ConfigEntry]) -> MaterializeSummary {
        let mut summary = MaterializeSummary::default();
        for entry in entries {
            if !is_valid_name(&entry.key) {
                summary.rejected.push(entry.key.clone());
                continue;
            }
            if self.is_set(&entry.key) {
                summary.kept.push(entry.key.clone());
                continue;
            }
            self.set(entry.key.as_str(), normalize_value(&entry.raw_value));
            summary.applied.push(entry.key.clone());
        }
        summary
    }
}

impl<K: Into<OsString>, V: Into<OsString>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| {
                    let key: OsString = key.into();
                    (env_key(&key), value.into())
                })
                .collect(),
        }
    }
}

#[cfg(windows)]
fn env_key(key: &OsStr) -> OsString {
    key.to_ascii_uppercase()
}

#[cfg(not(windows))]
fn env_key(key: &OsStr) -> OsString {
    key.to_os_string()
}

fn is_valid_name(key: &str) -> bool {
    !key.is_empty() && !key.contains(['=', '\0'])
}

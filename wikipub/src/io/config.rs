//! Wrapper settings stored in `wikipub.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// File name looked up in the working directory.
pub const SETTINGS_FILE: &str = "wikipub.toml";

/// Wrapper settings (TOML).
///
/// Every field is optional. The required variables and the fixed tool flags
/// are not settings and cannot be changed here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct WrapperConfig {
    /// Name or path of the publishing tool.
    pub executable: String,

    /// `.env` file, relative to the working directory.
    pub env_file: String,

    /// Virtualenv directory activated when `USE_VENV` is truthy.
    pub venv_dir: String,
}

impl Default for WrapperConfig {
    fn default() -> Self {
        Self {
            executable: "md2cf".to_string(),
            env_file: ".env".to_string(),
            venv_dir: ".venv".to_string(),
        }
    }
}

impl WrapperConfig {
    pub fn validate(&self) -> Result<()> {
        if self.executable.trim().is_empty() {
            return Err(anyhow!("executable must be non-empty"));
        }
        if self.env_file.trim().is_empty() {
            return Err(anyhow!("env_file must be non-empty"));
        }
        if self.venv_dir.trim().is_empty() {
            return Err(anyhow!("venv_dir must be non-empty"));
        }
        Ok(())
    }
}

/// Load settings from a TOML file.
///
/// If the file is missing, returns `WrapperConfig::default()`.
pub fn load_config(path: &Path) -> Result<WrapperConfig> {
    if !path.exists() {
        return Ok(WrapperConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: WrapperConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

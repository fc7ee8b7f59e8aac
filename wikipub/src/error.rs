//! Failure taxonomy for a publish run.
//!
//! Every variant is fatal. [`WrapperError::exit_code`] maps each one to the
//! status the wrapper exits with.

use std::path::PathBuf;

use thiserror::Error;

use crate::exit_codes;
use crate::io::process::ChildStatus;

#[derive(Debug, Error)]
pub enum WrapperError {
    #[error("cannot load settings: {0:#}")]
    Settings(anyhow::Error),

    #[error("cannot load env file: {0:#}")]
    EnvFile(anyhow::Error),

    #[error("required environment variable {name} is not set")]
    Configuration { name: String },

    #[error("cannot activate environment {}: {reason}", .dir.display())]
    EnvironmentActivation { dir: PathBuf, reason: String },

    #[error("'{executable}' not found on PATH; install it or activate the environment that provides it")]
    ToolNotFound { executable: String },

    #[error("failed to launch {}: {source}", .program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{executable} {status} after {elapsed_secs}s")]
    Invocation {
        executable: String,
        status: ChildStatus,
        elapsed_secs: u64,
    },
}

impl WrapperError {
    /// Process exit status for this failure. Never [`exit_codes::OK`].
    pub fn exit_code(&self) -> i32 {
        match self {
            WrapperError::Invocation { status, .. } => status.exit_code(),
            _ => exit_codes::FAILURE,
        }
    }
}

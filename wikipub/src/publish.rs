//! Orchestration for one publish run.
//!
//! A run moves through loading configuration, validating it, locating the
//! tool and invoking it. Each stage returns a [`Result`] and the first failure
//! ends the run; nothing is retried.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, instrument};

use crate::core::environment::Environment;
use crate::core::invocation::InvocationSpec;
use crate::core::required::{CONFLUENCE_HOST, CONFLUENCE_SPACE, REQUIRED_VARS, first_missing};
use crate::error::WrapperError;
use crate::exit_codes;
use crate::io::config::WrapperConfig;
use crate::io::env_file::read_env_file;
use crate::io::process::{LaunchRequest, ProcessLauncher};
use crate::io::tool::resolve_tool;
use crate::io::venv;

/// Inputs for a publish run.
#[derive(Debug, Clone)]
pub struct PublishRequest {
    /// Directory the `.env` file, the virtualenv and the tool are resolved
    /// against. Also the tool's working directory.
    pub workdir: PathBuf,
    pub settings: WrapperConfig,
    /// Snapshot of the wrapper's own environment.
    pub ambient: Environment,
    /// Arguments forwarded to the tool after the fixed flags.
    pub args: Vec<OsString>,
}

/// Result of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    pub code: i32,
    pub elapsed_secs: u64,
}

/// Run the publishing tool once with a fully resolved environment.
#[instrument(skip_all, fields(workdir = %request.workdir.display()))]
pub fn run_publish<L: ProcessLauncher>(
    request: PublishRequest,
    launcher: &L,
) -> Result<ExitOutcome, WrapperError> {
    let PublishRequest {
        workdir,
        settings,
        ambient,
        args,
    } = request;

    let env = resolve_environment(&workdir, &settings, ambient)?;
    check_required(&env)?;
    debug!(
        host = env.get(CONFLUENCE_HOST).unwrap_or_default(),
        space = env.get(CONFLUENCE_SPACE).unwrap_or_default(),
        "configuration resolved"
    );

    let program = check_tool(&settings.executable, &env, &workdir)?;
    let spec = InvocationSpec::new(settings.executable, args);
    invoke(launcher, &spec, program, env, workdir)
}

/// Merge the `.env` file into `ambient` and activate the virtualenv if asked.
pub fn resolve_environment(
    workdir: &Path,
    settings: &WrapperConfig,
    ambient: Environment,
) -> Result<Environment, WrapperError> {
    let entries =
        read_env_file(&workdir.join(&settings.env_file)).map_err(WrapperError::EnvFile)?;

    let mut env = ambient;
    let summary = env.materialize(&entries);
    debug!(
        applied = ?summary.applied,
        kept = ?summary.kept,
        "merged env file"
    );
    for key in &summary.rejected {
        debug!(key = %key, "ignored env file entry with unusable name");
    }

    let venv_dir = workdir.join(&settings.venv_dir);
    if venv::should_activate(&env, &venv_dir) {
        let bin = venv::activate(&mut env, &venv_dir)?;
        debug!(bin = %bin.display(), "activated virtualenv");
    }

    Ok(env)
}

/// Fail on the first required variable that is unset or empty.
pub fn check_required(env: &Environment) -> Result<(), WrapperError> {
    match first_missing(env, &REQUIRED_VARS) {
        Some(name) => Err(WrapperError::Configuration {
            name: name.to_string(),
        }),
        None => Ok(()),
    }
}

/// Locate the tool on the resolved `PATH`.
pub fn check_tool(
    executable: &str,
    env: &Environment,
    workdir: &Path,
) -> Result<PathBuf, WrapperError> {
    let program = resolve_tool(executable, env, workdir).map_err(|err| {
        debug!(executable, err = %err, "tool lookup failed");
        WrapperError::ToolNotFound {
            executable: executable.to_string(),
        }
    })?;
    debug!(program = %program.display(), "found tool");
    Ok(program)
}

fn invoke<L: ProcessLauncher>(
    launcher: &L,
    spec: &InvocationSpec,
    program: PathBuf,
    env: Environment,
    workdir: PathBuf,
) -> Result<ExitOutcome, WrapperError> {
    debug!(command = %spec.display(), "invoking tool");
    let request = LaunchRequest {
        program,
        args: spec.argv(),
        env,
        workdir,
    };

    let started = Instant::now();
    let status = launcher
        .run(&request)
        .map_err(|source| WrapperError::Launch {
            program: request.program.clone(),
            source,
        })?;
    let elapsed_secs = started.elapsed().as_secs();

    if !status.success() {
        return Err(WrapperError::Invocation {
            executable: spec.executable.clone(),
            status,
            elapsed_secs,
        });
    }
    Ok(ExitOutcome {
        code: exit_codes::OK,
        elapsed_secs,
    })
}

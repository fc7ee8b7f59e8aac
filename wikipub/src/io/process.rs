//! Launching the external tool as a child process.
//!
//! The [`ProcessLauncher`] trait decouples the publish run from actually
//! spawning a process. Tests use a recording launcher that returns a scripted
//! status without spawning anything.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use tracing::{debug, instrument};

use crate::core::environment::Environment;
use crate::exit_codes;

/// Parameters for one child process launch.
#[derive(Debug, Clone)]
pub struct LaunchRequest {
    /// Resolved path of the program to execute.
    pub program: PathBuf,
    /// Arguments after the program name.
    pub args: Vec<OsString>,
    /// Complete environment for the child. Nothing else is inherited.
    pub env: Environment,
    /// Working directory for the child.
    pub workdir: PathBuf,
}

/// How the child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildStatus {
    Exited(i32),
    /// Killed by the given signal (Unix only).
    Signaled(i32),
    /// Ended without an exit code or a known signal.
    Abnormal,
}

impl ChildStatus {
    pub fn success(&self) -> bool {
        matches!(self, ChildStatus::Exited(0))
    }

    /// Exit status the wrapper should report for a failed child.
    pub fn exit_code(&self) -> i32 {
        match *self {
            ChildStatus::Exited(exit_codes::OK) => exit_codes::FAILURE,
            ChildStatus::Exited(code) => code,
            ChildStatus::Signaled(signal) => exit_codes::SIGNAL_BASE + signal,
            ChildStatus::Abnormal => exit_codes::FAILURE,
        }
    }
}

impl From<ExitStatus> for ChildStatus {
    fn from(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ChildStatus::Exited(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return ChildStatus::Signaled(signal);
            }
        }
        ChildStatus::Abnormal
    }
}

impl fmt::Display for ChildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildStatus::Exited(code) => write!(f, "exited with status {code}"),
            ChildStatus::Signaled(signal) => write!(f, "was killed by signal {signal}"),
            ChildStatus::Abnormal => write!(f, "terminated abnormally"),
        }
    }
}

/// Abstraction over how the external tool is started.
pub trait ProcessLauncher {
    /// Run the program to completion and report how it ended.
    fn run(&self, request: &LaunchRequest) -> std::io::Result<ChildStatus>;
}

/// Launcher that spawns a real child process sharing the wrapper's stdio.
pub struct SystemLauncher;

impl ProcessLauncher for SystemLauncher {
    #[instrument(skip_all, fields(program = %request.program.display()))]
    fn run(&self, request: &LaunchRequest) -> std::io::Result<ChildStatus> {
        let mut cmd = Command::new(&request.program);
        cmd.args(&request.args)
            .env_clear()
            .envs(request.env.iter())
            .current_dir(&request.workdir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        debug!("spawning child process");
        // Blocks with no timeout: a publish run takes as long as it takes.
        let status = cmd.status()?;
        let status = ChildStatus::from(status);
        debug!(%status, "child process finished");
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_clean_exit_is_success() {
        assert!(ChildStatus::Exited(0).success());
        assert!(!ChildStatus::Exited(2).success());
        assert!(!ChildStatus::Signaled(9).success());
        assert!(!ChildStatus::Abnormal.success());
    }

    #[test]
    fn failure_exit_codes_are_never_zero() {
        assert_eq!(ChildStatus::Exited(3).exit_code(), 3);
        assert_eq!(ChildStatus::Exited(0).exit_code(), exit_codes::FAILURE);
        assert_eq!(ChildStatus::Signaled(15).exit_code(), 143);
        assert_eq!(ChildStatus::Abnormal.exit_code(), exit_codes::FAILURE);
    }

    #[cfg(unix)]
    fn sh_request(script: &str, env: Environment) -> LaunchRequest {
        LaunchRequest {
            program: PathBuf::from("/bin/sh"),
            args: vec![OsString::from("-c"), OsString::from(script)],
            env,
            workdir: std::env::temp_dir(),
        }
    }

    #[cfg(unix)]
    #[test]
    fn system_launcher_reports_exit_code() {
        let status = SystemLauncher
            .run(&sh_request("exit 3", Environment::default()))
            .expect("run sh");
        assert_eq!(status, ChildStatus::Exited(3));
    }

    #[cfg(unix)]
    #[test]
    fn system_launcher_passes_only_the_given_environment() {
        let temp = tempfile::tempdir().expect("tempdir");
        let out = temp.path().join("env.txt");
        let env: Environment = [("ONLY_VAR", "present")].into_iter().collect();
        let script = format!(
            "printf '%s|%s' \"$ONLY_VAR\" \"${{CARGO_MANIFEST_DIR:-unset}}\" > '{}'",
            out.display()
        );
        let status = SystemLauncher
            .run(&sh_request(&script, env))
            .expect("run sh");
        assert!(status.success());
        let written = std::fs::read_to_string(&out).expect("read env output");
        assert_eq!(written, "present|unset");
    }

    #[cfg(unix)]
    #[test]
    fn system_launcher_reports_signal() {
        let status = SystemLauncher
            .run(&sh_request("kill -TERM $$", Environment::default()))
            .expect("run sh");
        assert_eq!(status, ChildStatus::Signaled(15));
    }

    #[test]
    fn missing_program_is_a_launch_error() {
        let request = LaunchRequest {
            program: PathBuf::from("/definitely/not/here/md2cf"),
            args: Vec::new(),
            env: Environment::default(),
            workdir: std::env::temp_dir(),
        };
        assert!(SystemLauncher.run(&request).is_err());
    }
}

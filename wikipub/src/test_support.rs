//! Test-only helpers: a recording launcher and throwaway workspaces.

use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::core::environment::Environment;
use crate::core::required::{CONFLUENCE_HOST, CONFLUENCE_SPACE, CONFLUENCE_TOKEN};
use crate::io::config::WrapperConfig;
use crate::io::process::{ChildStatus, LaunchRequest, ProcessLauncher};
use crate::publish::PublishRequest;

/// Launcher that records every request and returns a scripted result.
pub struct RecordingLauncher {
    status: Option<ChildStatus>,
    requests: RefCell<Vec<LaunchRequest>>,
}

impl RecordingLauncher {
    /// Every run "exits" with `code`.
    pub fn exiting(code: i32) -> Self {
        Self {
            status: Some(ChildStatus::Exited(code)),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Every run fails as if the program could not be spawned.
    pub fn failing_to_spawn() -> Self {
        Self {
            status: None,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<LaunchRequest> {
        self.requests.borrow().clone()
    }
}

impl ProcessLauncher for RecordingLauncher {
    fn run(&self, request: &LaunchRequest) -> io::Result<ChildStatus> {
        self.requests.borrow_mut().push(request.clone());
        self.status
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "scripted spawn failure"))
    }
}

/// Write an executable `#!/bin/sh` script named `name` into `dir`.
#[cfg(unix)]
pub fn install_fake_tool(dir: &Path, name: &str, body: &str) -> Result<PathBuf> {
    use std::os::unix::fs::PermissionsExt;

    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n"))
        .with_context(|| format!("write {}", path.display()))?;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .with_context(|| format!("chmod {}", path.display()))?;
    Ok(path)
}

/// Temporary working directory for a publish run.
pub struct TestWorkspace {
    temp: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create temp workspace")?;
        Ok(Self { temp })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Directory used as `PATH` by [`TestWorkspace::complete_ambient`].
    pub fn bin_dir(&self) -> PathBuf {
        self.path().join("bin")
    }

    pub fn write_env_file(&self, contents: &str) -> Result<()> {
        let path = self.path().join(".env");
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))
    }

    /// Install a fake `md2cf` into [`TestWorkspace::bin_dir`].
    #[cfg(unix)]
    pub fn install_tool(&self, body: &str) -> Result<PathBuf> {
        install_fake_tool(&self.bin_dir(), "md2cf", body)
    }

    /// Ambient environment with every required variable and `PATH` set to
    /// the workspace `bin` directory.
    pub fn complete_ambient(&self) -> Environment {
        let mut env: Environment = [
            (CONFLUENCE_HOST, "wiki.example.com"),
            (CONFLUENCE_TOKEN, "t0k3n"),
            (CONFLUENCE_SPACE, "ENG"),
        ]
        .into_iter()
        .collect();
        env.set("PATH", self.bin_dir());
        env
    }

    /// Publish request rooted at this workspace with default settings.
    pub fn request(&self, ambient: Environment, args: &[&str]) -> PublishRequest {
        PublishRequest {
            workdir: self.path().to_path_buf(),
            settings: WrapperConfig::default(),
            ambient,
            args: args.iter().map(OsString::from).collect(),
        }
    }
}

//! Activation of a project-local Python virtualenv.
//!
//! Activation only edits the [`Environment`] handed to the tool: it points
//! `VIRTUAL_ENV` at the directory and puts its executables first on `PATH`.

use std::path::{Path, PathBuf};

use crate::core::environment::Environment;
use crate::error::WrapperError;

/// Variable that opts into activation.
pub const USE_VENV: &str = "USE_VENV";

#[cfg(windows)]
const BIN_DIR: &str = "Scripts";
#[cfg(not(windows))]
const BIN_DIR: &str = "bin";

/// Interpret a boolean-ish variable value.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// True when `USE_VENV` is truthy and `dir` exists.
pub fn should_activate(env: &Environment, dir: &Path) -> bool {
    env.get(USE_VENV).is_some_and(is_truthy) && dir.is_dir()
}

/// Activate the virtualenv at `dir` inside `env`, returning its executables
/// directory.
pub fn activate(env: &mut Environment, dir: &Path) -> Result<PathBuf, WrapperError> {
    let fail = |reason: String| WrapperError::EnvironmentActivation {
        dir: dir.to_path_buf(),
        reason,
    };

    let bin = dir.join(BIN_DIR);
    if !bin.is_dir() {
        return Err(fail(format!("missing {}", bin.display())));
    }

    let mut paths = vec![bin.clone()];
    if let Some(existing) = env.get_os("PATH") {
        paths.extend(std::env::split_paths(existing).filter(|p| !p.as_os_str().is_empty()));
    }
    let path = std::env::join_paths(paths).map_err(|err| fail(err.to_string()))?;

    env.set("PATH", path);
    env.set("VIRTUAL_ENV", dir.as_os_str());
    env.remove("PYTHONHOME");
    Ok(bin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn truthy_values() {
        for value in ["1", "true", "TRUE", "Yes", " on "] {
            assert!(is_truthy(value), "{value:?} should be truthy");
        }
        for value in ["", "0", "false", "no", "off", "enabled"] {
            assert!(!is_truthy(value), "{value:?} should be falsy");
        }
    }

    #[test]
    fn activation_requires_flag_and_directory() {
        let temp = tempfile::tempdir().expect("tempdir");
        let venv = temp.path().join(".venv");
        let flagged: Environment = [(USE_VENV, "1")].into_iter().collect();

        assert!(!should_activate(&flagged, &venv));
        std::fs::create_dir_all(&venv).expect("mkdir");
        assert!(should_activate(&flagged, &venv));
        assert!(!should_activate(&Environment::default(), &venv));
    }

    #[test]
    fn activate_prepends_bin_and_sets_virtual_env() {
        let temp = tempfile::tempdir().expect("tempdir");
        let venv = temp.path().join(".venv");
        std::fs::create_dir_all(venv.join(BIN_DIR)).expect("mkdir");
        let original = std::env::join_paths([Path::new("/usr/bin"), Path::new("/bin")])
            .expect("join");
        let mut env: Environment = [
            ("PATH", original.as_os_str()),
            ("PYTHONHOME", OsStr::new("/py")),
        ]
        .into_iter()
        .collect();

        let bin = activate(&mut env, &venv).expect("activate");

        let paths: Vec<PathBuf> =
            std::env::split_paths(env.get_os("PATH").expect("PATH")).collect();
        assert_eq!(paths[0], bin);
        assert_eq!(&paths[1..], &[PathBuf::from("/usr/bin"), PathBuf::from("/bin")]);
        assert_eq!(env.get_os("VIRTUAL_ENV"), Some(venv.as_os_str()));
        assert!(env.get_os("PYTHONHOME").is_none());
    }

    #[test]
    fn activate_without_bin_dir_fails() {
        let temp = tempfile::tempdir().expect("tempdir");
        let venv = temp.path().join(".venv");
        std::fs::create_dir_all(&venv).expect("mkdir");
        let mut env = Environment::default();

        let err = activate(&mut env, &venv).unwrap_err();
        assert!(matches!(err, WrapperError::EnvironmentActivation { .. }));
        assert!(env.is_empty());
    }
}

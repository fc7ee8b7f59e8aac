//! Locating the external tool before anything is launched.

use std::path::{Path, PathBuf};

use crate::core::environment::Environment;

/// Resolve `executable` using the `PATH` of `env`, not the wrapper's own.
///
/// Names containing a path separator are resolved against `workdir` instead
/// of `PATH`.
pub fn resolve_tool(executable: &str, env: &Environment, workdir: &Path) -> which::Result<PathBuf> {
    which::which_in(executable, env.get_os("PATH"), workdir)
}

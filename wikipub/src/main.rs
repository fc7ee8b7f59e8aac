//! Publish Markdown to the wiki by running `md2cf` with a prepared environment.
//!
//! Every argument is forwarded to `md2cf` after the fixed flags; the wrapper
//! has no flags of its own.

use anyhow::Context;
use tracing::{debug, error};
use wikipub::core::environment::Environment;
use wikipub::error::WrapperError;
use wikipub::io::config::{SETTINGS_FILE, load_config};
use wikipub::io::process::SystemLauncher;
use wikipub::logging;
use wikipub::publish::{ExitOutcome, PublishRequest, run_publish};

fn main() {
    logging::init();
    let code = match run() {
        Ok(outcome) => {
            debug!(elapsed_secs = outcome.elapsed_secs, "publish finished");
            outcome.code
        }
        Err(err) => {
            error!("{err}");
            err.exit_code()
        }
    };
    std::process::exit(code);
}

fn run() -> Result<ExitOutcome, WrapperError> {
    let workdir = std::env::current_dir()
        .context("resolve working directory")
        .map_err(WrapperError::Settings)?;
    let settings = load_config(&workdir.join(SETTINGS_FILE)).map_err(WrapperError::Settings)?;
    debug!(
        executable = %settings.executable,
        env_file = %settings.env_file,
        "loaded settings"
    );

    let request = PublishRequest {
        workdir,
        settings,
        ambient: Environment::capture(),
        args: std::env::args_os().skip(1).collect(),
    };
    run_publish(request, &SystemLauncher)
}

use std::ffi::OsString;

use toolwrap_core::LaunchContext;
use toolwrap_core::LaunchError;
use toolwrap_core::ProcessSpawner;
use toolwrap_core::SystemSpawner;
use toolwrap_core::launch;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Log level used when `RUST_LOG` is unset or invalid. Kept at `error` so a
/// wrapped tool's stderr carries nothing from the launcher by default.
const DEFAULT_LOG_LEVEL: &str = "error";

/// Installs the stderr tracing subscriber. Safe to call more than once.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_LEVEL))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}

/// Runs one launch with `args` forwarded verbatim and returns the code the
/// process should exit with. On failure the diagnostic line has already
/// been written to stdout.
pub fn run_main(args: Vec<OsString>) -> i32 {
    run_with_spawner(args, &SystemSpawner)
}

fn run_with_spawner(args: Vec<OsString>, spawner: &dyn ProcessSpawner) -> i32 {
    match LaunchContext::from_env(args).and_then(|context| launch(context, spawner)) {
        Ok(exit_code) => exit_code,
        Err(err) => {
            report(&err);
            err.exit_code()
        }
    }
}

#[allow(clippy::print_stdout)]
fn report(err: &LaunchError) {
    debug!(error = ?err, "launch failed");
    println!("{err}");
}

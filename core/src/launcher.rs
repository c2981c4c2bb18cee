use std::ffi::OsString;

use toolwrap_utils_absolute_path::AbsolutePathBuf;
use tracing::debug;

use crate::config::load_config;
use crate::delegate::run_delegate;
use crate::error::LaunchError;
use crate::error::Result;
use crate::platform::Target;
use crate::resolve::ResolveError;
use crate::spawn::ProcessSpawner;

/// Inputs for a single launch, gathered once from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchContext {
    pub target: Target,
    /// Directory holding the launcher executable and its configuration.
    pub executable_dir: AbsolutePathBuf,
    /// The caller's working directory, inherited by the delegate.
    pub working_dir: AbsolutePathBuf,
    /// The launcher's own arguments, without argv\[0\].
    pub args: Vec<OsString>,
}

impl LaunchContext {
    pub fn from_env(args: Vec<OsString>) -> Result<Self> {
        let working_dir = AbsolutePathBuf::current_dir()
            .map_err(|source| LaunchError::WorkingDirectory { source })?;
        let executable_dir = current_executable_dir().unwrap_or_else(|| {
            debug!("executable location unavailable, using the working directory");
            working_dir.clone()
        });

        Ok(Self {
            target: Target::current(),
            executable_dir,
            working_dir,
            args,
        })
    }
}

/// Directory of the running executable with symlinks resolved, so a
/// launcher reached through a link still finds the configuration installed
/// beside the real file.
fn current_executable_dir() -> Option<AbsolutePathBuf> {
    let exe = std::env::current_exe().ok()?;
    let exe = AbsolutePathBuf::from_absolute_path(exe).ok()?;
    let exe = exe.canonicalize().unwrap_or(exe);
    exe.parent()
}

/// Resolves the configured program for `context.target` and runs it through
/// `spawner`, returning the child's exit code.
pub fn launch(context: LaunchContext, spawner: &dyn ProcessSpawner) -> Result<i32> {
    let LaunchContext {
        target,
        executable_dir,
        working_dir,
        args,
    } = context;
    debug!(%target, executable_dir = %executable_dir.display(), "launching");

    let config = load_config(executable_dir.as_path())?;
    let program = config.resolve_program(target).inspect_err(|err| {
        if let ResolveError::UnsupportedTarget { .. } = err {
            let configured: Vec<&str> = config.targets().collect();
            debug!(?configured, "no entry for target");
        }
    })?;

    let exit_code = run_delegate(
        &program,
        executable_dir.as_path(),
        &working_dir,
        args,
        spawner,
    )?;
    Ok(exit_code)
}

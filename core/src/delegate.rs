use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;
use toolwrap_utils_absolute_path::AbsolutePathBuf;
use tracing::debug;

use crate::env_expand::expand_env_vars;
use crate::spawn::ProcessSpawner;
use crate::spawn::ResolvedCommand;

#[derive(Debug, Error)]
pub enum DelegateError {
    #[error("Unable to start process {}", path.display())]
    LaunchFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Expands environment references in `raw_program` and resolves the result
/// against `executable_dir`, so relative entries always point at files
/// bundled with the launcher regardless of the caller's directory.
pub fn resolve_program_path(
    raw_program: &str,
    executable_dir: &Path,
) -> std::io::Result<AbsolutePathBuf> {
    let expanded = expand_env_vars(raw_program);
    AbsolutePathBuf::resolve_path_against_base(expanded, executable_dir)
}

/// Builds the command for the delegate program without starting it.
pub fn resolve_command(
    raw_program: &str,
    executable_dir: &Path,
    working_dir: &AbsolutePathBuf,
    args: Vec<OsString>,
) -> Result<ResolvedCommand, DelegateError> {
    let program = resolve_program_path(raw_program, executable_dir).map_err(|source| {
        DelegateError::LaunchFailure {
            path: PathBuf::from(raw_program),
            source,
        }
    })?;
    Ok(ResolvedCommand {
        program,
        args,
        cwd: working_dir.clone(),
    })
}

/// Runs the delegate program to completion and returns its exit code.
pub fn run_delegate(
    raw_program: &str,
    executable_dir: &Path,
    working_dir: &AbsolutePathBuf,
    args: Vec<OsString>,
    spawner: &dyn ProcessSpawner,
) -> Result<i32, DelegateError> {
    let command = resolve_command(raw_program, executable_dir, working_dir, args)?;
    debug!(
        program = %command.program.display(),
        cwd = %command.cwd.display(),
        "starting delegate program"
    );

    let exit_code =
        spawner
            .spawn_and_wait(&command)
            .map_err(|source| DelegateError::LaunchFailure {
                path: command.program.to_path_buf(),
                source,
            })?;
    debug!(exit_code, "delegate program exited");
    Ok(exit_code)
}

use std::ffi::OsString;
use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;

use toolwrap_utils_absolute_path::AbsolutePathBuf;
use tracing::trace;

/// Exit code reported when the platform gives neither an exit code nor a
/// terminating signal for a finished child.
pub const UNKNOWN_EXIT_CODE: i32 = 1;

/// A signal-terminated child exits with `128 + signal`, as shells report it.
#[cfg(unix)]
const SIGNAL_EXIT_CODE_BASE: i32 = 128;

/// Everything needed to start the delegate program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    pub program: AbsolutePathBuf,
    /// Passed to the child one element per argument, never re-split.
    pub args: Vec<OsString>,
    pub cwd: AbsolutePathBuf,
}

/// Starts a resolved command and blocks until it exits.
///
/// `Err` means the process could not be started at all; once the child has
/// started, its exit is always reported as an exit code.
pub trait ProcessSpawner {
    fn spawn_and_wait(&self, command: &ResolvedCommand) -> std::io::Result<i32>;
}

/// Spawns real OS processes with inherited stdin, stdout, stderr and
/// environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSpawner;

impl ProcessSpawner for SystemSpawner {
    fn spawn_and_wait(&self, command: &ResolvedCommand) -> std::io::Result<i32> {
        let ResolvedCommand { program, args, cwd } = command;
        trace!("spawn_and_wait: {program:?} {args:?} {cwd:?}");

        let mut cmd = Command::new(program.as_path());
        cmd.args(args);
        cmd.current_dir(cwd);
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let mut child = cmd.spawn()?;
        trace!(pid = child.id(), "delegate started");
        let status = child.wait()?;
        Ok(exit_code_from_status(status))
    }
}

/// Converts a finished child's status into the code the launcher exits with.
pub fn exit_code_from_status(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;

        if let Some(signal) = status.signal() {
            return SIGNAL_EXIT_CODE_BASE + signal;
        }
    }
    UNKNOWN_EXIT_CODE
}

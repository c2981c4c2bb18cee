use thiserror::Error;

use crate::config::ConfigError;
use crate::delegate::DelegateError;
use crate::resolve::ResolveError;

pub type Result<T> = std::result::Result<T, LaunchError>;

/// Exit code for every failure the launcher detects itself.
pub const LAUNCH_FAILURE_EXIT_CODE: i32 = 1;

/// Any reason the delegate program did not run. The `Display` text is the
/// single diagnostic line shown to the caller.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Delegate(#[from] DelegateError),

    #[error("Unable to determine working directory: {source}")]
    WorkingDirectory {
        #[source]
        source: std::io::Error,
    },
}

impl LaunchError {
    pub fn exit_code(&self) -> i32 {
        LAUNCH_FAILURE_EXIT_CODE
    }
}

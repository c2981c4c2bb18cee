//! Root of the `toolwrap-core` library.
//!
//! A launch runs strictly in order: detect the target, load the
//! configuration beside the executable, resolve the configured program,
//! then spawn it and wait. Any failure ends the launch with a
//! [`LaunchError`] whose message is the one line shown to the caller.

// Prevent accidental direct writes to stdout/stderr in library code. The
// diagnostic line is printed by the binary, everything else goes through
// tracing.
#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod config;
pub mod delegate;
pub mod env_expand;
pub mod error;
mod host_arch;
mod launcher;
pub mod platform;
pub mod resolve;
pub mod spawn;

pub use config::CONFIG_FILE_NAME;
pub use config::ConfigError;
pub use config::WrapperConfig;
pub use config::load_config;
pub use delegate::DelegateError;
pub use delegate::run_delegate;
pub use error::LaunchError;
pub use launcher::LaunchContext;
pub use launcher::launch;
pub use platform::Arch;
pub use platform::Os;
pub use platform::Target;
pub use resolve::ResolveError;
pub use resolve::resolve_program;
pub use spawn::ProcessSpawner;
pub use spawn::ResolvedCommand;
pub use spawn::SystemSpawner;

use serde_json::Value;
use thiserror::Error;

use crate::config::WrapperConfig;
use crate::platform::Target;

/// Name of the per-target field holding the delegate program path.
pub const PROGRAM_FIELD: &str = "program";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("This tool does not support the {target} target")]
    UnsupportedTarget { target: String },

    #[error("Bad configuration for {target} target")]
    BadConfiguration { target: String },
}

/// Returns the raw `program` string configured for `target`, exactly as
/// stored. Environment references are not expanded here.
pub fn resolve_program(config: &WrapperConfig, target: &str) -> Result<String, ResolveError> {
    let entry = config
        .entries
        .get(target)
        .ok_or_else(|| ResolveError::UnsupportedTarget {
            target: target.to_string(),
        })?;

    // Entries that are not objects, and `program` values that are not
    // strings, are both malformed rather than unsupported.
    match entry.get(PROGRAM_FIELD) {
        Some(Value::String(program)) => Ok(program.clone()),
        _ => Err(ResolveError::BadConfiguration {
            target: target.to_string(),
        }),
    }
}

impl WrapperConfig {
    pub fn resolve_program(&self, target: Target) -> Result<String, ResolveError> {
        resolve_program(self, &target.key())
    }
}

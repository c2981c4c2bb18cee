//! Loading of the `DotnetToolWrapper.json` sidecar file.
//!
//! The document is a JSON object keyed by target key. It is read fresh on
//! every launch and never written.

use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// File name of the configuration document, looked up next to the launcher
/// executable.
pub const CONFIG_FILE_NAME: &str = "DotnetToolWrapper.json";

const UTF8_BOM: char = '\u{feff}';

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration file {}", path.display())]
    Missing { path: PathBuf },

    #[error("Invalid configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration file {}: expected a JSON object", path.display())]
    NotAnObject { path: PathBuf },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Missing { path }
            | ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::NotAnObject { path } => path,
        }
    }
}

/// The parsed configuration document, kept exactly as read.
#[derive(Debug, Clone, PartialEq)]
pub struct WrapperConfig {
    pub(crate) entries: Map<String, Value>,
}

impl WrapperConfig {
    pub fn from_map(entries: Map<String, Value>) -> Self {
        Self { entries }
    }

    /// Parses a document from its JSON text. `path` is only used for error
    /// reporting. A leading UTF-8 byte order mark is skipped.
    pub fn from_json_str(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let contents = contents.strip_prefix(UTF8_BOM).unwrap_or(contents);
        let value: Value =
            serde_json::from_str(contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        match value {
            Value::Object(entries) => Ok(Self { entries }),
            _ => Err(ConfigError::NotAnObject {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Configured target keys.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.entries
    }
}

pub fn config_path(executable_dir: &Path) -> PathBuf {
    executable_dir.join(CONFIG_FILE_NAME)
}

/// Reads and parses the configuration document that sits in
/// `executable_dir`.
pub fn load_config(executable_dir: &Path) -> Result<WrapperConfig, ConfigError> {
    let path = config_path(executable_dir);
    debug!("loading launcher configuration from {}", path.display());

    // Only a regular file (or a link to one) counts as present.
    if !path.is_file() {
        return Err(ConfigError::Missing { path });
    }
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(ConfigError::Missing { path });
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    let config = WrapperConfig::from_json_str(&contents, &path)?;
    debug!(
        targets = config.entries.len(),
        "loaded launcher configuration"
    );
    Ok(config)
}

use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

#[derive(Debug, thiserror::Error)]
pub enum CargoBinError {
    #[error("failed to read current directory")]
    CurrentDir {
        #[source]
        source: std::io::Error,
    },
    #[error("CARGO_BIN_EXE env var {key} resolved to {path:?}, but it does not exist")]
    ResolvedPathDoesNotExist { key: String, path: PathBuf },
    #[error("could not locate binary {name:?}; tried env vars {env_keys:?}; {fallback}")]
    NotFound {
        name: String,
        env_keys: Vec<String>,
        fallback: String,
    },
    #[error("failed to create staging directory in {path:?}")]
    StagingDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to copy {from:?} to {to:?}")]
    Stage {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Returns an absolute path to a binary target built for the current test run.
///
/// `CARGO_BIN_EXE_*` is honored when present in the runtime environment;
/// otherwise the binary is located next to the test executable the way
/// `assert_cmd` does it.
pub fn cargo_bin(name: &str) -> Result<PathBuf, CargoBinError> {
    let env_keys = cargo_bin_env_keys(name);
    for key in &env_keys {
        if let Some(value) = std::env::var_os(key) {
            return resolve_bin_from_env(key, value);
        }
    }
    #[allow(deprecated)]
    let located = assert_cmd::Command::cargo_bin(name);
    match located {
        Ok(cmd) => {
            let mut path = PathBuf::from(cmd.get_program());
            if !path.is_absolute() {
                path = std::env::current_dir()
                    .map_err(|source| CargoBinError::CurrentDir { source })?
                    .join(path);
            }
            if path.exists() {
                Ok(path)
            } else {
                Err(CargoBinError::ResolvedPathDoesNotExist {
                    key: "assert_cmd::Command::cargo_bin".to_owned(),
                    path,
                })
            }
        }
        Err(err) => Err(CargoBinError::NotFound {
            name: name.to_owned(),
            env_keys,
            fallback: format!("assert_cmd fallback failed: {err}"),
        }),
    }
}

/// Creates a scratch directory next to the built binary `name`, so that
/// [`stage_bin`] can hard-link into it instead of copying.
pub fn staging_dir(name: &str) -> Result<TempDir, CargoBinError> {
    let bin = cargo_bin(name)?;
    let parent = bin.parent().map_or_else(std::env::temp_dir, Path::to_path_buf);
    tempfile::Builder::new()
        .prefix("staged-")
        .tempdir_in(&parent)
        .map_err(|source| CargoBinError::StagingDir {
            path: parent,
            source,
        })
}

/// Places the binary target `name` into `dir` and returns the path of the
/// staged executable.
///
/// Binaries that read sidecar files from their own directory need a private
/// copy per test, otherwise tests running in parallel would race on the
/// files placed next to the shared build output.
pub fn stage_bin(name: &str, dir: &Path) -> Result<PathBuf, CargoBinError> {
    let from = cargo_bin(name)?;
    let file_name = from
        .file_name()
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| OsString::from(name));
    let to = dir.join(file_name);

    // A hard link never holds a writable descriptor on the new file, which
    // avoids ETXTBSY when another test thread forks while we stage. Fall
    // back to copying across filesystems; `fs::copy` keeps the mode bits.
    if std::fs::hard_link(&from, &to).is_err() {
        std::fs::copy(&from, &to).map_err(|source| CargoBinError::Stage {
            from: from.clone(),
            to: to.clone(),
            source,
        })?;
    }
    Ok(to)
}

fn cargo_bin_env_keys(name: &str) -> Vec<String> {
    let mut keys = Vec::with_capacity(2);
    keys.push(format!("CARGO_BIN_EXE_{name}"));

    // Cargo replaces dashes in target names when exporting env vars.
    let underscore_name = name.replace('-', "_");
    if underscore_name != name {
        keys.push(format!("CARGO_BIN_EXE_{underscore_name}"));
    }

    keys
}

fn resolve_bin_from_env(key: &str, value: OsString) -> Result<PathBuf, CargoBinError> {
    let raw = PathBuf::from(&value);
    if raw.is_absolute() && raw.exists() {
        return Ok(raw);
    }

    Err(CargoBinError::ResolvedPathDoesNotExist {
        key: key.to_owned(),
        path: raw,
    })
}

use path_absolutize::Absolutize;
use std::path::Display;
use std::path::Path;
use std::path::PathBuf;

/// A path that is guaranteed to be absolute and normalized (though it is not
/// guaranteed to be canonicalized or exist on the filesystem).
///
/// Normalization is purely lexical: `.` components are dropped and `..`
/// components pop their parent, without consulting the filesystem. Use
/// [`AbsolutePathBuf::canonicalize`] when symlinks must be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AbsolutePathBuf(PathBuf);

impl AbsolutePathBuf {
    /// Resolves `path` against `base_path` when it is relative. Absolute
    /// paths ignore the base and are only normalized.
    pub fn resolve_path_against_base<P: AsRef<Path>, B: AsRef<Path>>(
        path: P,
        base_path: B,
    ) -> std::io::Result<Self> {
        let absolute_path = path.as_ref().absolutize_from(base_path.as_ref())?;
        Ok(Self(absolute_path.into_owned()))
    }

    /// Relative inputs are resolved against the process working directory.
    pub fn from_absolute_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let absolute_path = path.as_ref().absolutize()?;
        Ok(Self(absolute_path.into_owned()))
    }

    pub fn current_dir() -> std::io::Result<Self> {
        let current_dir = std::env::current_dir()?;
        Self::from_absolute_path(current_dir)
    }

    /// Resolves symlinks through the filesystem. On Windows the result avoids
    /// `\\?\` verbatim prefixes whenever the plain form is equivalent.
    pub fn canonicalize(&self) -> std::io::Result<Self> {
        let canonical = dunce::canonicalize(&self.0)?;
        Ok(Self(canonical))
    }

    pub fn parent(&self) -> Option<Self> {
        // The parent of a normalized absolute path is itself normalized and
        // absolute, so no re-resolution is needed.
        self.0.parent().map(|p| Self(p.to_path_buf()))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn to_path_buf(&self) -> PathBuf {
        self.0.clone()
    }

    pub fn display(&self) -> Display<'_> {
        self.0.display()
    }
}

impl AsRef<Path> for AbsolutePathBuf {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

use crate::core_fs::error::FsError;
use log::debug;
use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

/// Narrow view of the host filesystem used by sessions.
///
/// Implementations hold no per-client state: every call receives the
/// working directory of the session issuing it, so concurrent sessions
/// never observe each other's navigation.
pub trait Filesystem: Send + Sync {
    /// Reports `cwd` back to the client. Fails if it is gone.
    fn working_directory(&self, cwd: &Path) -> Result<OsString, FsError>;

    /// Resolves the raw client argument `path` against `cwd` and returns
    /// the new working directory.
    fn change_directory(&self, cwd: &Path, path: &[u8]) -> Result<PathBuf, FsError>;

    /// Names of the immediate children of `cwd`, in the order the OS yields them.
    fn list_entries(&self, cwd: &Path) -> Result<Vec<OsString>, FsError>;
}

/// `Filesystem` backed by `std::fs`.
#[derive(Debug, Default, Clone)]
pub struct LocalFilesystem {
    root: Option<PathBuf>,
}

impl LocalFilesystem {
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Confines every `change_directory` target to `root`.
    /// `root` must already be canonical.
    pub fn confined_to(root: PathBuf) -> Self {
        Self { root: Some(root) }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    fn require_directory(path: &Path) -> Result<(), FsError> {
        let metadata = fs::metadata(path).map_err(|e| FsError::io(path, e))?;
        if metadata.is_dir() {
            Ok(())
        } else {
            Err(FsError::NotADirectory(path.to_path_buf()))
        }
    }
}

impl Filesystem for LocalFilesystem {
    fn working_directory(&self, cwd: &Path) -> Result<OsString, FsError> {
        Self::require_directory(cwd)?;
        Ok(cwd.as_os_str().to_os_string())
    }

    fn change_directory(&self, cwd: &Path, path: &[u8]) -> Result<PathBuf, FsError> {
        if path.is_empty() {
            return Err(FsError::EmptyPath);
        }

        // An absolute `path` replaces `cwd` entirely.
        let target = cwd.join(os_str_from_bytes(path));
        let canonical = target
            .canonicalize()
            .map_err(|e| FsError::io(&target, e))?;
        Self::require_directory(&canonical)?;

        if let Some(root) = &self.root {
            if !canonical.starts_with(root) {
                return Err(FsError::OutsideRoot(canonical));
            }
        }

        debug!(
            "Resolved {:?} from {:?} to {:?}",
            String::from_utf8_lossy(path),
            cwd,
            canonical
        );
        Ok(canonical)
    }

    fn list_entries(&self, cwd: &Path) -> Result<Vec<OsString>, FsError> {
        let entries = fs::read_dir(cwd).map_err(|e| FsError::io(cwd, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| FsError::io(cwd, e))?;
            names.push(entry.file_name());
        }
        Ok(names)
    }
}

#[cfg(unix)]
fn os_str_from_bytes(bytes: &[u8]) -> Cow<'_, OsStr> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn os_str_from_bytes(bytes: &[u8]) -> Cow<'_, OsStr> {
    Cow::Owned(OsString::from(String::from_utf8_lossy(bytes).into_owned()))
}

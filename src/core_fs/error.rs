// Errors raised by the filesystem adapter
use std::path::PathBuf;
use thiserror::Error;

use crate::core_reply::Reply;

#[derive(Error, Debug)]
pub enum FsError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Empty path")]
    EmptyPath,

    #[error("Path escapes the root directory: {0}")]
    OutsideRoot(PathBuf),
}

impl FsError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FsError::Io {
            path: path.into(),
            source,
        }
    }

    /// The client never learns the cause, only that the operation failed.
    pub fn to_reply(&self) -> Reply {
        Reply::Error
    }
}

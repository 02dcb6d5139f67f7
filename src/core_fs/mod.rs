// Filesystem adapter used by the sessions

pub mod adapter;
pub mod error;

pub use adapter::{Filesystem, LocalFilesystem};
pub use error::FsError;

//! Typed error definitions for fs_facade.
//! One error type for every library operation: canned variants for the pre-checks
//! (exists / does not exist / invalid handle) and `Os` for anything the OS reported.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::fs_ops::helpers::build_message;

/// Result alias used across the library.
pub type Result<T, E = FsError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("File already exists: {}", .0.display())]
    FileExists(PathBuf),

    #[error("File does not exist: {}", .0.display())]
    FileNotExists(PathBuf),

    #[error("Folder already exists: {}", .0.display())]
    FolderExists(PathBuf),

    #[error("Folder does not exist: {}", .0.display())]
    FolderNotExists(PathBuf),

    #[error("Invalid file handle")]
    InvalidHandle,

    #[error("Invalid open mode: '{0}'")]
    InvalidMode(String),

    #[error("End of file reached: {}", .0.display())]
    EndOfFile(PathBuf),

    #[error("Cannot copy '{}' onto itself or into its own subtree: '{}'", .source_path.display(), .destination.display())]
    InvalidDestination {
        source_path: PathBuf,
        destination: PathBuf,
    },

    #[error("{message}")]
    Os {
        message: String,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    /// Wrap an OS failure with the operation and path it happened on.
    pub fn os(op: &str, path: &Path, source: io::Error) -> Self {
        FsError::Os {
            message: build_message(op, path, &source),
            source,
        }
    }

    /// Stable numeric code per variant (CLI exit status, structured log field).
    pub fn code(&self) -> i32 {
        match self {
            FsError::FileExists(_) => 10,
            FsError::FileNotExists(_) => 11,
            FsError::FolderExists(_) => 12,
            FsError::FolderNotExists(_) => 13,
            FsError::InvalidHandle => 14,
            FsError::InvalidMode(_) => 15,
            FsError::EndOfFile(_) => 16,
            FsError::InvalidDestination { .. } => 17,
            FsError::Os { .. } => 20,
        }
    }

    /// The io::ErrorKind behind an `Os` error.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            FsError::Os { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

//! Error types for envboot-fs

use std::path::PathBuf;

/// Result type for envboot-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in envboot-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Refusing to overwrite existing file {path}")]
    AlreadyExists { path: PathBuf },

    #[error("Expected a directory at {path}, found a file")]
    NotADirectory { path: PathBuf },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

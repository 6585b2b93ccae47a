//! Error types for envboot-core

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] envboot_fs::Error),

    #[error(transparent)]
    Python(#[from] envboot_python::Error),

    #[error("Failed to parse bootstrap config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Bootstrap config not found at {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Refusing to use {path} as the virtual environment directory: {reason}")]
    InvalidEnvDir { path: PathBuf, reason: String },
}

impl Error {
    /// Whether this is the post-install import check failing, as opposed
    /// to an earlier installation failure.
    pub fn is_smoke_test_failure(&self) -> bool {
        matches!(
            self,
            Self::Python(envboot_python::Error::SmokeTestFailed { .. })
        )
    }

    /// Process exit code for this error: the failed subprocess's own code
    /// where there is one, otherwise 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Python(e) => e.exit_code().unwrap_or(1),
            _ => 1,
        }
    }
}

//! Error types for envboot-python

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] envboot_fs::Error),

    #[error("Python not found (tried {}). Install Python 3 and make sure it is on PATH.", .candidates.join(", "))]
    InterpreterNotFound { candidates: Vec<String> },

    #[error("Failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Virtual environment creation failed at {path} (exit code {code}): {stderr}")]
    EnvCreationFailed {
        path: PathBuf,
        code: i32,
        stderr: String,
    },

    #[error("Failed to upgrade pip (exit code {code}): {stderr}")]
    PipUpgradeFailed { code: i32, stderr: String },

    #[error("Dependency installation from {source_desc} failed (exit code {code}): {stderr}")]
    InstallFailed {
        source_desc: String,
        code: i32,
        stderr: String,
    },

    #[error("Smoke test failed: could not import {}: {stderr}", .modules.join(", "))]
    SmokeTestFailed {
        modules: Vec<String>,
        code: i32,
        stderr: String,
    },
}

impl Error {
    /// Exit code of the failed subprocess, when a subprocess failed.
    ///
    /// Signal termination (recorded as -1) has no usable code.
    pub fn exit_code(&self) -> Option<i32> {
        let code = match self {
            Self::EnvCreationFailed { code, .. }
            | Self::PipUpgradeFailed { code, .. }
            | Self::InstallFailed { code, .. }
            | Self::SmokeTestFailed { code, .. } => *code,
            _ => return None,
        };
        (code > 0).then_some(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_from_failed_command() {
        let err = Error::InstallFailed {
            source_desc: "requirements.txt".to_string(),
            code: 3,
            stderr: String::new(),
        };
        assert_eq!(err.exit_code(), Some(3));
    }

    #[test]
    fn test_exit_code_absent_for_signals_and_lookups() {
        let killed = Error::PipUpgradeFailed {
            code: -1,
            stderr: String::new(),
        };
        assert_eq!(killed.exit_code(), None);

        let missing = Error::InterpreterNotFound {
            candidates: vec!["python3".to_string()],
        };
        assert_eq!(missing.exit_code(), None);
    }
}

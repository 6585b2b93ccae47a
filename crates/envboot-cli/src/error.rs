//! Error types for envboot-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from the bootstrap routine
    #[error(transparent)]
    Core(#[from] envboot_core::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// Process exit code: a failed install step's own code, otherwise 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Core(e) => e.exit_code(),
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_propagates_installer_code() {
        let err = CliError::from(envboot_core::Error::from(
            envboot_python::Error::InstallFailed {
                source_desc: "fallback package set".to_string(),
                code: 3,
                stderr: String::new(),
            },
        ));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_defaults_to_one() {
        assert_eq!(CliError::user("bad root").exit_code(), 1);
        let missing = CliError::from(envboot_core::Error::from(
            envboot_python::Error::InterpreterNotFound {
                candidates: vec!["python3".to_string()],
            },
        ));
        assert_eq!(missing.exit_code(), 1);
    }
}

//! Virtual environment reconciliation using Python's built-in venv module

use envboot_fs::{NormalizedPath, io};
use tracing::info;

use crate::error::{Error, Result};
use crate::interpreter::Interpreter;
use crate::runner::{CommandRunner, CommandSpec};

/// A project virtual environment at a fixed location.
///
/// The environment is disposable: [`VirtualEnv::recreate`] always deletes
/// whatever is at the location and builds a fresh one with `python -m venv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualEnv {
    root: NormalizedPath,
}

impl VirtualEnv {
    pub fn new(root: NormalizedPath) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// Path of the environment's own interpreter.
    pub fn python_path(&self) -> NormalizedPath {
        if cfg!(windows) {
            self.root.join("Scripts").join("python.exe")
        } else {
            self.root.join("bin").join("python")
        }
    }

    /// Shell command that activates this environment.
    ///
    /// `display_root` is the environment path as the user should type it,
    /// usually relative to the project directory.
    pub fn activation_command(display_root: &str) -> String {
        if cfg!(windows) {
            format!("{}\\Scripts\\activate", display_root.replace('/', "\\"))
        } else {
            format!("source {}/bin/activate", display_root)
        }
    }

    /// Delete any existing environment and create a fresh one.
    ///
    /// Returns `true` if a previous environment (or anything else at the
    /// location) was removed.
    pub fn recreate<R: CommandRunner>(
        &self,
        runner: &R,
        interpreter: &Interpreter,
        project_dir: &NormalizedPath,
    ) -> Result<bool> {
        let removed = io::remove_dir_if_exists(&self.root)?;
        if removed {
            info!(path = %self.root, "Removed existing virtual environment");
        }

        let spec = CommandSpec::new(interpreter.program.as_str())
            .args(["-m", "venv"])
            .arg(self.root.as_str())
            .current_dir(project_dir.to_native());

        let output = runner.run(&spec).map_err(|source| Error::Spawn {
            command: spec.to_string(),
            source,
        })?;

        if !output.success() {
            return Err(Error::EnvCreationFailed {
                path: self.root.to_native(),
                code: output.exit_code(),
                stderr: output.stderr.trim().to_string(),
            });
        }

        info!(path = %self.root, "Created virtual environment");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_path_inside_root() {
        let venv = VirtualEnv::new(NormalizedPath::new("/srv/app/venv"));
        let python = venv.python_path();
        assert!(python.as_str().starts_with("/srv/app/venv/"));
        if cfg!(windows) {
            assert!(python.as_str().ends_with("Scripts/python.exe"));
        } else {
            assert!(python.as_str().ends_with("bin/python"));
        }
    }

    #[test]
    fn test_activation_command() {
        let cmd = VirtualEnv::activation_command("venv");
        if cfg!(windows) {
            assert_eq!(cmd, "venv\\Scripts\\activate");
        } else {
            assert_eq!(cmd, "source venv/bin/activate");
        }
    }
}

//! Post-install import check

use tracing::info;

use crate::error::{Error, Result};
use crate::runner::{CommandRunner, CommandSpec};
use crate::venv::VirtualEnv;

/// Build the `-c` program that imports every module in one statement.
pub fn import_statement(modules: &[String]) -> String {
    format!("import {}", modules.join(", "))
}

/// Import every module with the environment's interpreter.
///
/// A failure here means the installation is corrupt or incomplete, and is
/// reported as [`Error::SmokeTestFailed`] rather than as an install error.
pub fn smoke_test<R: CommandRunner>(runner: &R, venv: &VirtualEnv, modules: &[String]) -> Result<()> {
    if modules.is_empty() {
        return Ok(());
    }

    let spec = CommandSpec::new(venv.python_path().as_str())
        .arg("-c")
        .arg(import_statement(modules));

    let output = runner.run(&spec).map_err(|source| Error::Spawn {
        command: spec.to_string(),
        source,
    })?;

    if !output.success() {
        return Err(Error::SmokeTestFailed {
            modules: modules.to_vec(),
            code: output.exit_code(),
            stderr: last_line(&output.stderr),
        });
    }

    info!(count = modules.len(), "All dependencies importable");
    Ok(())
}

/// The final traceback line carries the actual `ModuleNotFoundError`.
fn last_line(stderr: &str) -> String {
    stderr
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_statement() {
        let modules = vec!["fastapi".to_string(), "bs4".to_string()];
        assert_eq!(import_statement(&modules), "import fastapi, bs4");
    }

    #[test]
    fn test_last_line_of_traceback() {
        let stderr = "Traceback (most recent call last):\n  File \"<string>\", line 1\nModuleNotFoundError: No module named 'bs4'\n\n";
        assert_eq!(last_line(stderr), "ModuleNotFoundError: No module named 'bs4'");
    }
}

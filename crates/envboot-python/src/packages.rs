//! Dependency installation into a virtual environment

use std::fmt;

use envboot_fs::{NormalizedPath, io};
use tracing::info;

use crate::error::{Error, Result};
use crate::manifest::{Requirement, parse_requirements};
use crate::runner::{CommandRunner, CommandSpec};
use crate::venv::VirtualEnv;

/// Packages installed when the project has no requirements manifest.
pub const FALLBACK_PACKAGES: &[&str] = &[
    "fastapi",
    "uvicorn[standard]",
    "pydantic",
    "python-dotenv",
    "pandas",
    "requests",
    "openai",
    "python-multipart",
    "beautifulsoup4",
    "bs4",
];

/// Top-level modules the server imports, checked after installation.
pub const SMOKE_IMPORTS: &[&str] = &[
    "fastapi",
    "uvicorn",
    "pydantic",
    "dotenv",
    "pandas",
    "requests",
    "openai",
    "multipart",
    "bs4",
];

/// Where the dependency list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageSource {
    /// A requirements file handed to `pip install -r`
    Manifest(NormalizedPath),
    /// An explicit package list
    Fallback(Vec<String>),
}

impl PackageSource {
    /// Use the manifest if it exists, otherwise the given fallback set.
    pub fn select(manifest: &NormalizedPath, fallback: &[String]) -> Self {
        if manifest.is_file() {
            Self::Manifest(manifest.clone())
        } else {
            Self::Fallback(fallback.to_vec())
        }
    }

    /// The built-in fallback set as owned strings.
    pub fn default_fallback() -> Vec<String> {
        FALLBACK_PACKAGES.iter().map(|p| p.to_string()).collect()
    }

    /// Requirements this source will install, for reporting.
    pub fn requirements(&self) -> Result<Vec<Requirement>> {
        match self {
            Self::Manifest(path) => Ok(parse_requirements(&io::read_text(path)?)),
            Self::Fallback(packages) => Ok(parse_requirements(&packages.join("\n"))),
        }
    }

    fn install_args(&self) -> Vec<String> {
        let mut args = vec!["-m".to_string(), "pip".to_string(), "install".to_string()];
        match self {
            Self::Manifest(path) => {
                args.push("-r".to_string());
                args.push(path.as_str().to_string());
            }
            Self::Fallback(packages) => args.extend(packages.iter().cloned()),
        }
        args
    }
}

impl fmt::Display for PackageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manifest(path) => write!(f, "{}", path.file_name().unwrap_or(path.as_str())),
            Self::Fallback(_) => write!(f, "fallback package set"),
        }
    }
}

/// Upgrade the environment's pip before installing anything else.
pub fn upgrade_pip<R: CommandRunner>(runner: &R, venv: &VirtualEnv) -> Result<()> {
    let spec = CommandSpec::new(venv.python_path().as_str())
        .args(["-m", "pip", "install", "--upgrade", "pip"])
        .streaming();

    let output = runner.run(&spec).map_err(|source| Error::Spawn {
        command: spec.to_string(),
        source,
    })?;

    if !output.success() {
        return Err(Error::PipUpgradeFailed {
            code: output.exit_code(),
            stderr: output.stderr.trim().to_string(),
        });
    }
    Ok(())
}

/// Install `source` into `venv`.
pub fn install<R: CommandRunner>(
    runner: &R,
    venv: &VirtualEnv,
    source: &PackageSource,
) -> Result<()> {
    info!(source = %source, "Installing dependencies");

    let spec = CommandSpec::new(venv.python_path().as_str())
        .args(source.install_args())
        .streaming();

    let output = runner.run(&spec).map_err(|e| Error::Spawn {
        command: spec.to_string(),
        source: e,
    })?;

    if !output.success() {
        return Err(Error::InstallFailed {
            source_desc: source.to_string(),
            code: output.exit_code(),
            stderr: output.stderr.trim().to_string(),
        });
    }
    Ok(())
}

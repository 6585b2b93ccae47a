//! Python environment handling for envboot.
//!
//! This crate discovers a Python interpreter, rebuilds the project's
//! virtual environment from scratch, installs dependencies into it, and
//! verifies the result with an import smoke test. Every subprocess goes
//! through the [`CommandRunner`] trait so callers can substitute a fake.

pub mod error;
pub mod interpreter;
pub mod manifest;
pub mod packages;
pub mod runner;
pub mod smoke;
pub mod venv;

pub use error::{Error, Result};
pub use interpreter::{Interpreter, PythonVersion};
pub use manifest::Requirement;
pub use packages::{FALLBACK_PACKAGES, PackageSource, SMOKE_IMPORTS};
pub use runner::{CommandOutput, CommandRunner, CommandSpec, OutputMode, SystemRunner};
pub use venv::VirtualEnv;

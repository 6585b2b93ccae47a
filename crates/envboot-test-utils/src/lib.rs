//! Shared test utilities for the envboot workspace.
//!
//! Used by integration tests only, never published.
//!
//! # Modules
//!
//! - [`project`]: [`Project`] temporary project directory fixture
//! - [`runner`]: [`ScriptedRunner`] fake for [`envboot_python::CommandRunner`]
//! - [`clipboard`]: [`RecordingClipboard`] fake for [`envboot_core::ClipboardWriter`]

pub mod clipboard;
pub mod project;
pub mod runner;

pub use clipboard::RecordingClipboard;
pub use project::Project;
pub use runner::ScriptedRunner;

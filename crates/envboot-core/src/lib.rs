//! Bootstrap routine for the email-generation server's environment.
//!
//! [`Bootstrapper`] runs the linear setup sequence against an explicit
//! [`BootstrapConfig`]: interpreter check, virtual environment rebuild,
//! dependency installation, directory and `.env` scaffolding, import smoke
//! test, and onboarding guidance. Progress is reported as [`Event`]s to a
//! caller-supplied [`Reporter`].

pub mod bootstrap;
pub mod clipboard;
pub mod config;
pub mod envfile;
pub mod error;
pub mod event;
pub mod scaffold;

pub use bootstrap::{BootstrapReport, Bootstrapper};
pub use clipboard::{ClipboardError, ClipboardWriter, SystemClipboard};
pub use config::BootstrapConfig;
pub use envfile::{EnvFileStatus, PLACEHOLDER_API_KEY};
pub use error::{Error, Result};
pub use event::{Event, PlannedAction, Reporter, Step};
pub use scaffold::ConfigOutcome;

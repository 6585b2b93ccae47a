//! Filesystem primitives for envboot
//!
//! Provides normalized path handling plus the idempotent, non-clobbering
//! I/O operations the bootstrapper relies on.

pub mod error;
pub mod io;
pub mod path;

pub use error::{Error, Result};
pub use path::NormalizedPath;

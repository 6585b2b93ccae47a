//! Command implementations

mod bootstrap;

pub use bootstrap::run_bootstrap;

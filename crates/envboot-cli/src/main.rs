//! envboot
//!
//! Prepares a checkout of the email generation server for local use.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use envboot_core::BootstrapConfig;

use cli::Cli;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let root = project_root(cli.root)?;
    tracing::debug!(root = %root.display(), "Resolved project directory");

    let mut config = BootstrapConfig::load(root.as_path(), cli.config.as_deref())?;
    if cli.no_clipboard {
        config.clipboard = false;
    }

    commands::run_bootstrap(&config, cli.dry_run)
}

fn project_root(root: Option<PathBuf>) -> Result<PathBuf> {
    let root = match root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    if !root.is_dir() {
        return Err(CliError::user(format!(
            "Project directory '{}' does not exist",
            root.display()
        )));
    }
    Ok(dunce::canonicalize(&root)?)
}

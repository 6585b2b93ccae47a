//! The bootstrap command
//!
//! Runs the full setup, or only reports the plan with `--dry-run`.

use colored::Colorize;
use envboot_core::{BootstrapConfig, Bootstrapper, SystemClipboard};
use envboot_python::SystemRunner;

use crate::error::Result;
use crate::output::ConsoleReporter;

pub fn run_bootstrap(config: &BootstrapConfig, dry_run: bool) -> Result<()> {
    println!(
        "{} Setting up the email generation server in {}",
        "=>".blue().bold(),
        config.base.as_str().cyan()
    );

    let clipboard = SystemClipboard::new();
    let bootstrapper = Bootstrapper::new(config, SystemRunner).with_clipboard(&clipboard);
    let mut reporter = ConsoleReporter::stdout();

    if dry_run {
        println!("{}", "Dry run: nothing will be changed".yellow());
        bootstrapper.plan(&mut reporter)?;
        return Ok(());
    }

    let report = bootstrapper.run(&mut reporter)?;
    tracing::debug!(
        replaced = report.environment_replaced,
        created_dirs = report.created_dirs.len(),
        clipboard = report.clipboard_copied,
        "Bootstrap finished"
    );
    Ok(())
}

//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

/// Set up the email generation server: virtual environment, dependencies,
/// working directories and .env file
#[derive(Parser, Debug)]
#[command(name = "envboot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project directory to bootstrap (defaults to the current directory)
    #[arg(short, long, env = "ENVBOOT_ROOT")]
    pub root: Option<PathBuf>,

    /// Bootstrap config file (defaults to envboot.toml in the project directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Do not copy the activation command to the clipboard
    #[arg(long)]
    pub no_clipboard: bool,

    /// Show what would be done without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

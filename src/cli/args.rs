//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// relock - Reproducible per-platform uv lockfile maintenance
///
/// Checks whether the stored dependency lock for the current platform and
/// Python version is still valid and relocks every supported combination
/// when it is not.
#[derive(Parser, Debug)]
#[command(name = "relock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Project root directory
    #[arg(short, long, global = true, env = "RELOCK_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Python version to lock for (defaults to probing python3)
    #[arg(short, long, global = true, env = "RELOCK_PYTHON_VERSION")]
    pub python_version: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check the stored lock for this environment, relocking if stale
    Check(CheckArgs),

    /// Force a full relock of every platform and Python version
    Lock(LockArgs),

    /// Print a stored compilation without resolving anything
    Show(ShowArgs),

    /// Check toolchain health and project layout
    Status,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Use highest-compatible instead of lowest-direct resolution
    #[arg(long)]
    pub high: bool,
}

/// Arguments for the lock command
#[derive(Parser, Debug)]
pub struct LockArgs {
    /// Use highest-compatible instead of lowest-direct resolution
    #[arg(long)]
    pub high: bool,
}

/// Arguments for the show command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Use the highest-dependencies store
    #[arg(long)]
    pub high: bool,

    /// Platform to show (defaults to the current platform)
    #[arg(long)]
    pub platform: Option<String>,
}

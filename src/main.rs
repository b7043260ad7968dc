//! relock - Reproducible per-platform uv lockfile maintenance
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use relock::cli::{Cli, Commands};
use relock::config::Layout;
use relock::error::RelockResult;
use relock::platform::Environment;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> RelockResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("relock=warn"),
        1 => EnvFilter::new("relock=info"),
        _ => EnvFilter::new("relock=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let layout = Layout::load(&cli.root).await?;

    // Status only reports on the environment, it never needs to resolve it
    if let Commands::Status = cli.command {
        return relock::cli::commands::status(&layout).await;
    }

    let env = Environment::detect(cli.python_version.clone()).await?;

    match cli.command {
        Commands::Status => unreachable!("Status handled above"),
        Commands::Check(args) => relock::cli::commands::check(&args, &layout, &env).await,
        Commands::Lock(args) => relock::cli::commands::lock(&args, &layout, &env).await,
        Commands::Show(args) => relock::cli::commands::show(&args, &layout, &env).await,
    }
}

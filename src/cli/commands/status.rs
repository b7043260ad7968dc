//! Status command - check toolchain health and project layout

use crate::config::Layout;
use crate::error::RelockResult;
use crate::platform::Platform;
use crate::toolchain::{Toolchain, UvToolchain};
use console::{style, Emoji};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "[OK] ");
static CROSS: Emoji<'_, '_> = Emoji("✗ ", "[FAIL] ");
static WARN: Emoji<'_, '_> = Emoji("⚠ ", "[WARN] ");

/// Execute the status command
pub async fn execute(layout: &Layout) -> RelockResult<()> {
    println!("{}", style("relock Status").bold().cyan());
    println!();

    println!("{}", style("Environment:").bold());
    match Platform::detect() {
        Ok(platform) => println!("  {} Platform: {}", CHECK, platform),
        Err(e) => println!("  {} {} - {}", CROSS, style("Platform").red(), e),
    }

    println!();
    println!("{}", style("Toolchain:").bold());
    check_uv(layout).await;
    check_cli(layout.git_bin(), "brew install git").await;
    check_cli("python3", "install a Python interpreter").await;

    println!();
    println!("{}", style("Project layout:").bold());
    check_file("dev requirements", &layout.dev_requirements(), true);
    check_file("no-compile requirements", &layout.nodeps_requirements(), false);
    check_file("override constraints", &layout.override_requirements(), true);
    check_file("python versions", &layout.python_versions_file(), false);
    check_file("lockfile", &layout.lockfile(false), false);
    check_file("lockfile (high)", &layout.lockfile(true), false);

    let versions = layout.python_versions().await?;
    println!();
    println!("{}", style("Supported versions:").bold());
    println!("  {} Python: {}", CHECK, versions.join(", "));

    Ok(())
}

async fn check_uv(layout: &Layout) {
    let toolchain = UvToolchain::new(layout.clone());
    match toolchain.resolver_version().await {
        Ok(version) => {
            println!("  {} {} {}", CHECK, style(layout.uv_bin()).green(), version);
        }
        Err(_) => {
            println!(
                "  {} {} - Not found. Install: https://docs.astral.sh/uv/",
                CROSS,
                style(layout.uv_bin()).red()
            );
        }
    }
}

async fn check_cli(name: &str, install_hint: &str) {
    let result = Command::new(name)
        .arg("--version")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await;

    match result {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            let first_line = version.lines().next().unwrap_or("unknown");
            println!("  {} {} - {}", CHECK, style(name).green(), first_line.trim());
        }
        _ => {
            println!(
                "  {} {} - Not found. Install: {}",
                WARN,
                style(name).yellow(),
                install_hint
            );
        }
    }
}

fn check_file(label: &str, path: &Path, required: bool) {
    if path.exists() {
        println!("  {} {}: {}", CHECK, label, path.display());
    } else if required {
        println!(
            "  {} {}: {} {}",
            CROSS,
            label,
            path.display(),
            style("(missing)").red()
        );
    } else {
        println!(
            "  {} {}: {} {}",
            WARN,
            label,
            path.display(),
            style("(missing)").yellow()
        );
    }
}

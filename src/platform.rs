//! Execution environment detection
//!
//! The lock core never reads process-wide state; it receives an
//! [`Environment`] describing the platform and Python version to check
//! against, built once at startup.

use crate::error::{RelockError, RelockResult};
use std::fmt;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// A platform the resolver can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Linux,
    Macos,
    Windows,
}

impl Platform {
    /// All platforms every lock covers, in store-key order
    pub const ALL: [Platform; 3] = [Platform::Linux, Platform::Macos, Platform::Windows];

    /// Detect the platform relock is running on
    pub fn detect() -> RelockResult<Self> {
        match std::env::consts::OS {
            "linux" => Ok(Platform::Linux),
            "macos" => Ok(Platform::Macos),
            "windows" => Ok(Platform::Windows),
            other => Err(RelockError::UnsupportedPlatform(other.to_string())),
        }
    }

    /// Identifier used in store keys and resolver arguments
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Macos => "macos",
            Platform::Windows => "windows",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = RelockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linux" => Ok(Platform::Linux),
            "macos" => Ok(Platform::Macos),
            "windows" => Ok(Platform::Windows),
            other => Err(RelockError::UnsupportedPlatform(other.to_string())),
        }
    }
}

/// The environment a compatibility check runs against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Platform relock is running on
    pub platform: Platform,

    /// `major.minor` Python version associated with this environment
    pub python_version: String,
}

impl Environment {
    /// Build the current environment.
    ///
    /// The Python version comes from `python_version` when given, otherwise
    /// from probing the `python3` interpreter on PATH.
    pub async fn detect(python_version: Option<String>) -> RelockResult<Self> {
        let platform = Platform::detect()?;
        let python_version = match python_version {
            Some(version) => version,
            None => probe_python_version().await?,
        };
        debug!("Environment: {} / Python {}", platform, python_version);
        Ok(Self {
            platform,
            python_version,
        })
    }
}

/// Ask `python3 --version` for the interpreter version, reduced to
/// `major.minor`.
async fn probe_python_version() -> RelockResult<String> {
    let output = Command::new("python3")
        .arg("--version")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| RelockError::command_failed("python3 --version", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(RelockError::PythonVersionUnknown(stderr.trim().to_string()));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_python_version(&stdout)
        .ok_or_else(|| RelockError::PythonVersionUnknown(stdout.trim().to_string()))
}

/// Parse `Python 3.11.4` down to `3.11`.
fn parse_python_version(output: &str) -> Option<String> {
    let full = output.split_whitespace().nth(1)?;
    let mut parts = full.split('.');
    let major = parts.next()?;
    let minor = parts.next()?;
    Some(format!("{major}.{minor}"))
}

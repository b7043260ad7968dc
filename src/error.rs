//! Error types for relock
//!
//! All modules use `RelockResult<T>` as their return type.
//!
//! Staleness of stored lock data (missing store file, missing key,
//! unparseable header, pin or dependency drift) is never an error; those
//! conditions route to a full relock. Only subprocess and IO failures
//! land here.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for relock operations
pub type RelockResult<T> = Result<T, RelockError>;

/// All errors that can occur in relock
#[derive(Error, Debug)]
pub enum RelockError {
    // Environment errors
    #[error("Unsupported platform: {0}. relock locks for linux, macos and windows.")]
    UnsupportedPlatform(String),

    #[error("Could not determine the current Python version: {0}")]
    PythonVersionUnknown(String),

    // Resolver errors
    #[error("Resolver failed: {command}\n{stderr}")]
    ResolverFailed { command: String, stderr: String },

    #[error("Could not parse resolver version from `{output}`")]
    ResolverVersionParse { output: String },

    // Version control errors
    #[error("Failed to resolve pinned commit for {path}: {stderr}")]
    SubmoduleLookup { path: String, stderr: String },

    // Store errors
    #[error("No stored compilation for {0}")]
    CompilationNotFound(String),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Malformed lockfile {path}: {reason}")]
    LockfileMalformed { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed to start: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RelockError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ResolverFailed { .. } | Self::ResolverVersionParse { .. } => {
                Some("Check that uv is installed: https://docs.astral.sh/uv/")
            }
            Self::SubmoduleLookup { .. } => Some("Run: git submodule update --init"),
            Self::PythonVersionUnknown(_) => {
                Some("Pass --python-version or set RELOCK_PYTHON_VERSION")
            }
            _ => None,
        }
    }
}

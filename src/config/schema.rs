//! Configuration schema for relock
//!
//! Configuration is stored at `<project root>/relock.toml` and every field
//! is optional; a missing file means defaults throughout.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Resolver binary to invoke
    pub uv: String,

    /// Version-control binary used for submodule pin lookups
    pub git: String,

    /// Directory holding the requirement input files
    pub requirements_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            uv: "uv".to_string(),
            git: "git".to_string(),
            requirements_dir: PathBuf::from("requirements"),
        }
    }
}

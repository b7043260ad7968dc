//! Configuration and project layout for relock

pub mod schema;

pub use schema::Config;

use crate::error::{RelockError, RelockResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Python versions locked for when no `.python-versions` file exists
pub const DEFAULT_PYTHON_VERSIONS: [&str; 4] = ["3.9", "3.10", "3.11", "3.12"];

/// Name of the optional project configuration file
pub const CONFIG_FILE: &str = "relock.toml";

/// Resolved file layout for one project root
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
    config: Config,
}

impl Layout {
    /// Load the layout for a project root, reading `relock.toml` when present
    pub async fn load(root: impl Into<PathBuf>) -> RelockResult<Self> {
        let root = root.into();
        let config_path = root.join(CONFIG_FILE);

        let config = if config_path.exists() {
            let content = fs::read_to_string(&config_path).await.map_err(|e| {
                RelockError::io(format!("reading config from {}", config_path.display()), e)
            })?;
            toml::from_str(&content).map_err(|e| RelockError::ConfigInvalid {
                path: config_path.clone(),
                reason: e.to_string(),
            })?
        } else {
            debug!("No {CONFIG_FILE} found, using defaults");
            Config::default()
        };

        Ok(Self { root, config })
    }

    /// Build a layout from an explicit config, without touching the filesystem
    pub fn with_config(root: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolver binary to invoke
    pub fn uv_bin(&self) -> &str {
        &self.config.uv
    }

    /// Version-control binary to invoke
    pub fn git_bin(&self) -> &str {
        &self.config.git
    }

    /// Primary dependency declarations, including editable and submodule lines
    pub fn dev_requirements(&self) -> PathBuf {
        self.root.join(self.dev_requirements_relative())
    }

    /// Root-relative counterpart of [`Self::dev_requirements`], for the argv
    /// of commands that run with the project root as their working directory
    pub fn dev_requirements_relative(&self) -> PathBuf {
        self.config.requirements_dir.join("dev.in")
    }

    /// Dependencies appended to every lock without resolving their own deps
    pub fn nodeps_requirements(&self) -> PathBuf {
        self.root
            .join(&self.config.requirements_dir)
            .join("nodeps.in")
    }

    /// Overrides satisfying otherwise incompatible combinations
    pub fn override_requirements(&self) -> PathBuf {
        self.root.join(self.override_requirements_relative())
    }

    /// Root-relative counterpart of [`Self::override_requirements`]
    pub fn override_requirements_relative(&self) -> PathBuf {
        self.config.requirements_dir.join("override.txt")
    }

    /// Optional file listing the supported Python versions, one per line
    pub fn python_versions_file(&self) -> PathBuf {
        self.root.join(".python-versions")
    }

    /// Store file for one resolution mode
    pub fn lockfile(&self, high: bool) -> PathBuf {
        self.root
            .join(if high { "lock-high.json" } else { "lock.json" })
    }

    /// Supported Python versions, from `.python-versions` or the defaults
    pub async fn python_versions(&self) -> RelockResult<Vec<String>> {
        let path = self.python_versions_file();
        if !path.exists() {
            return Ok(DEFAULT_PYTHON_VERSIONS
                .iter()
                .map(|v| v.to_string())
                .collect());
        }

        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| RelockError::io(format!("reading {}", path.display()), e))?;

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_defaults_when_missing() {
        let temp = TempDir::new().unwrap();
        let layout = Layout::load(temp.path()).await.unwrap();

        assert_eq!(layout.uv_bin(), "uv");
        assert_eq!(
            layout.dev_requirements(),
            temp.path().join("requirements").join("dev.in")
        );
        assert_eq!(layout.lockfile(false), temp.path().join("lock.json"));
        assert_eq!(layout.lockfile(true), temp.path().join("lock-high.json"));
    }

    #[tokio::test]
    async fn relative_accessors_never_include_the_root() {
        let temp = TempDir::new().unwrap();
        let layout = Layout::load(temp.path()).await.unwrap();

        assert_eq!(
            layout.dev_requirements_relative(),
            PathBuf::from("requirements").join("dev.in")
        );
        assert_eq!(
            layout.override_requirements_relative(),
            PathBuf::from("requirements").join("override.txt")
        );
        assert!(layout.dev_requirements_relative().is_relative());
    }

    #[tokio::test]
    async fn load_reads_relock_toml() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE),
            "uv = \"bin/uv\"\nrequirements_dir = \"reqs\"\n",
        )
        .unwrap();

        let layout = Layout::load(temp.path()).await.unwrap();
        assert_eq!(layout.uv_bin(), "bin/uv");
        assert_eq!(
            layout.nodeps_requirements(),
            temp.path().join("reqs").join("nodeps.in")
        );
    }

    #[tokio::test]
    async fn load_rejects_invalid_toml() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE), "uv = [").unwrap();

        let err = Layout::load(temp.path()).await.unwrap_err();
        assert!(matches!(err, RelockError::ConfigInvalid { .. }));
    }

    #[tokio::test]
    async fn python_versions_default_when_file_missing() {
        let temp = TempDir::new().unwrap();
        let layout = Layout::load(temp.path()).await.unwrap();

        let versions = layout.python_versions().await.unwrap();
        assert_eq!(versions, vec!["3.9", "3.10", "3.11", "3.12"]);
    }

    #[tokio::test]
    async fn python_versions_from_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".python-versions"), "3.11\n3.12\n\n").unwrap();
        let layout = Layout::load(temp.path()).await.unwrap();

        let versions = layout.python_versions().await.unwrap();
        assert_eq!(versions, vec!["3.11", "3.12"]);
    }
}

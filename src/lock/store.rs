//! Lockfile store
//!
//! One JSON document per resolution mode (`lock.json`, `lock-high.json`),
//! mapping `{platform}_{python_version}[_high]` keys to fragment text.
//! Reads are lazy and a missing file or key is simply an empty result;
//! writes always replace the whole document.

use crate::error::{RelockError, RelockResult};
use crate::platform::Platform;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info};

/// Store key for one platform/Python version/mode combination
pub fn compilation_key(platform: Platform, python_version: &str, high: bool) -> String {
    if high {
        format!("{platform}_{python_version}_high")
    } else {
        format!("{platform}_{python_version}")
    }
}

/// Mode-keyed pair of lock store files
#[derive(Debug, Clone)]
pub struct LockStore {
    normal: PathBuf,
    high: PathBuf,
}

impl LockStore {
    /// Create a store over the two mode-specific lockfile paths
    pub fn new(normal: PathBuf, high: PathBuf) -> Self {
        Self { normal, high }
    }

    fn path(&self, high: bool) -> &PathBuf {
        if high {
            &self.high
        } else {
            &self.normal
        }
    }

    /// Fetch the stored fragment for a key.
    ///
    /// A missing store file or absent key yields an empty string, never an
    /// error; only unreadable or malformed store files fail.
    pub async fn get(
        &self,
        platform: Platform,
        python_version: &str,
        high: bool,
    ) -> RelockResult<String> {
        let path = self.path(high);
        if !path.exists() {
            debug!("No lockfile at {}", path.display());
            return Ok(String::new());
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| RelockError::io(format!("reading lockfile {}", path.display()), e))?;

        let contents: BTreeMap<String, String> =
            serde_json::from_str(&content).map_err(|e| RelockError::LockfileMalformed {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        let key = compilation_key(platform, python_version, high);
        Ok(contents.get(&key).cloned().unwrap_or_default())
    }

    /// Replace the store for one mode with a complete key→fragment mapping.
    ///
    /// Serialized pretty-printed with sorted keys and a trailing newline.
    pub async fn put_all(
        &self,
        contents: &BTreeMap<String, String>,
        high: bool,
    ) -> RelockResult<()> {
        let path = self.path(high);
        let mut data = serde_json::to_string_pretty(contents)?;
        data.push('\n');

        fs::write(path, data)
            .await
            .map_err(|e| RelockError::io(format!("writing lockfile {}", path.display()), e))?;

        info!("Wrote {} compilations to {}", contents.len(), path.display());
        Ok(())
    }
}

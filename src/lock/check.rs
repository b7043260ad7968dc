//! Compatibility check and full relock
//!
//! `Locker::check` decides whether the stored compilation for the current
//! environment is still valid. The check is a linear chain of guards,
//! ordered cheapest first so resolver invocations only happen once the
//! string-level checks pass; any failed guard routes to a full relock over
//! every supported platform and Python version.

use crate::error::RelockResult;
use crate::lock::fragment;
use crate::lock::store::{compilation_key, LockStore};
use crate::platform::{Environment, Platform};
use crate::toolchain::Toolchain;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Orchestrates compatibility checks and relocks for one environment
pub struct Locker<'a> {
    env: &'a Environment,
    platforms: &'a [Platform],
    python_versions: &'a [String],
    store: &'a LockStore,
    toolchain: &'a dyn Toolchain,
}

impl<'a> Locker<'a> {
    /// Create a locker over the supported platform/Python version matrix
    pub fn new(
        env: &'a Environment,
        platforms: &'a [Platform],
        python_versions: &'a [String],
        store: &'a LockStore,
        toolchain: &'a dyn Toolchain,
    ) -> Self {
        Self {
            env,
            platforms,
            python_versions,
            store,
            toolchain,
        }
    }

    /// Return a compilation valid for the current environment, relocking
    /// everything first if the stored one is stale.
    pub async fn check(&self, high: bool) -> RelockResult<String> {
        let old = self
            .store
            .get(self.env.platform, &self.env.python_version, high)
            .await?;
        if old.is_empty() {
            info!("No stored compilation; relocking");
            return self.lock_all(high, None).await;
        }

        let Some(old_version) = fragment::resolver_version(&old) else {
            info!("Stored compilation has no resolver version stamp; relocking");
            return self.lock_all(high, None).await;
        };
        if old_version != self.toolchain.resolver_version().await? {
            info!("Resolver version changed since last lock; relocking");
            return self.lock_all(high, None).await;
        }

        let directs = self
            .toolchain
            .compile(self.env.platform, &self.env.python_version, high, true)
            .await?;

        // Pins are compared positionally; extra pins beyond the shorter
        // list are ignored.
        let old_pins = fragment::submodule_pins(&old);
        let new_pins = fragment::submodule_pins(&directs);
        if old_pins.iter().zip(new_pins.iter()).any(|(old, new)| old != new) {
            info!("Submodule pinned commit changed; relocking");
            return self.lock_all(high, None).await;
        }

        let mut old_directs = Vec::new();
        for direct in fragment::dependencies(&directs) {
            match fragment::find_dependency(&old, &direct.name) {
                Some(line) => old_directs.push(line),
                None => {
                    info!("Direct dependency {} missing from stored compilation; relocking", direct.name);
                    return self.lock_all(high, None).await;
                }
            }
        }

        let full = self
            .toolchain
            .compile(self.env.platform, &self.env.python_version, high, false)
            .await?;
        if old_directs.iter().any(|line| !full.contains(line.as_str())) {
            info!("Direct dependency version changed; relocking");
            return self.lock_all(high, Some(full)).await;
        }

        Ok(old)
    }

    /// Lock dependencies for every supported platform and Python version,
    /// rewriting the store wholesale, and return the compilation matching
    /// the current environment.
    ///
    /// `precomputed` carries an already-compiled fragment for the current
    /// environment so it is stored as-is rather than recompiled. The full
    /// key→fragment map is assembled before any store write, so a failed
    /// compilation never leaves a partial lockfile behind.
    pub async fn lock_all(&self, high: bool, precomputed: Option<String>) -> RelockResult<String> {
        let mut contents: BTreeMap<String, String> = BTreeMap::new();
        let mut current = precomputed;

        for platform in self.platforms {
            for python_version in self.python_versions {
                let key = compilation_key(*platform, python_version, high);
                let is_current = *platform == self.env.platform
                    && python_version == &self.env.python_version;

                let compilation = match (is_current, &current) {
                    (true, Some(fragment)) => fragment.clone(),
                    _ => {
                        let fragment = self
                            .toolchain
                            .compile(*platform, python_version, high, false)
                            .await?;
                        if is_current {
                            current = Some(fragment.clone());
                        }
                        fragment
                    }
                };
                contents.insert(key, compilation);
            }
        }

        self.store.put_all(&contents, high).await?;

        Ok(current.unwrap_or_else(|| {
            warn!(
                "Current environment {}/{} is outside the supported matrix",
                self.env.platform, self.env.python_version
            );
            String::new()
        }))
    }
}

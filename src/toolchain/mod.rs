//! Resolver toolchain abstraction
//!
//! The lock core only needs two operations from the outside world: "what
//! resolver version is installed" and "resolve dependencies for this
//! platform/Python version into a fragment". Putting them behind a trait
//! keeps the compatibility check testable without spawning processes.

mod uv;

pub use uv::UvToolchain;

use crate::error::RelockResult;
use crate::platform::Platform;
use async_trait::async_trait;

/// The external dependency resolver and its version-control collaborator
#[async_trait]
pub trait Toolchain: Send + Sync {
    /// Version of the installed resolver CLI
    async fn resolver_version(&self) -> RelockResult<String>;

    /// Resolve dependencies for one platform and Python version into a
    /// complete lock fragment.
    ///
    /// `high` selects highest-compatible over lowest-direct resolution;
    /// `no_deps` restricts resolution to direct dependencies only.
    async fn compile(
        &self,
        platform: Platform,
        python_version: &str,
        high: bool,
        no_deps: bool,
    ) -> RelockResult<String>;
}

//! relock - Reproducible per-platform uv lockfile maintenance
//!
//! Keeps per-platform/per-Python-version dependency lockfiles valid by
//! checking stored compilations against the current resolver version,
//! submodule pins and direct dependencies, relocking everything when any
//! of them drift.

pub mod cli;
pub mod config;
pub mod error;
pub mod escape;
pub mod lock;
pub mod platform;
pub mod toolchain;

pub use error::{RelockError, RelockResult};

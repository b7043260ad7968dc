//! Lock fragments, the lockfile store and the compatibility check

pub mod check;
pub mod fragment;
pub mod store;

pub use check::Locker;
pub use store::{compilation_key, LockStore};

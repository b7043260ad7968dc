//! Lock command - force a full relock of every supported combination

use crate::cli::args::LockArgs;
use crate::config::Layout;
use crate::error::RelockResult;
use crate::lock::{Locker, LockStore};
use crate::platform::{Environment, Platform};
use crate::toolchain::UvToolchain;

/// Execute the lock command
pub async fn execute(args: &LockArgs, layout: &Layout, env: &Environment) -> RelockResult<()> {
    let store = LockStore::new(layout.lockfile(false), layout.lockfile(true));
    let python_versions = layout.python_versions().await?;
    let toolchain = UvToolchain::new(layout.clone());
    let locker = Locker::new(env, &Platform::ALL, &python_versions, &store, &toolchain);

    let compilation = locker.lock_all(args.high, None).await?;
    print!("{compilation}");
    Ok(())
}

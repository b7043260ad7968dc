//! Check command - validate the stored lock, relocking when stale

use crate::cli::args::CheckArgs;
use crate::config::Layout;
use crate::error::RelockResult;
use crate::lock::{Locker, LockStore};
use crate::platform::{Environment, Platform};
use crate::toolchain::UvToolchain;

/// Execute the check command
pub async fn execute(args: &CheckArgs, layout: &Layout, env: &Environment) -> RelockResult<()> {
    let store = LockStore::new(layout.lockfile(false), layout.lockfile(true));
    let python_versions = layout.python_versions().await?;
    let toolchain = UvToolchain::new(layout.clone());
    let locker = Locker::new(env, &Platform::ALL, &python_versions, &store, &toolchain);

    let compilation = locker.check(args.high).await?;
    print!("{compilation}");
    Ok(())
}

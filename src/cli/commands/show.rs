//! Show command - print a stored compilation without resolving anything

use crate::cli::args::ShowArgs;
use crate::config::Layout;
use crate::error::{RelockError, RelockResult};
use crate::lock::{compilation_key, LockStore};
use crate::platform::{Environment, Platform};

/// Execute the show command
pub async fn execute(args: &ShowArgs, layout: &Layout, env: &Environment) -> RelockResult<()> {
    let platform = match &args.platform {
        Some(name) => name.parse::<Platform>()?,
        None => env.platform,
    };

    let store = LockStore::new(layout.lockfile(false), layout.lockfile(true));
    let compilation = store
        .get(platform, &env.python_version, args.high)
        .await?;

    if compilation.is_empty() {
        return Err(RelockError::CompilationNotFound(compilation_key(
            platform,
            &env.python_version,
            args.high,
        )));
    }

    print!("{compilation}");
    Ok(())
}

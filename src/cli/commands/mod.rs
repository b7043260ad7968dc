//! CLI command implementations

pub mod check;
pub mod lock;
pub mod show;
pub mod status;

pub use check::execute as check;
pub use lock::execute as lock;
pub use show::execute as show;
pub use status::execute as status;

//! CLI Commands
//!
//! All sha256x8 CLI commands organized as separate modules.

mod check;
mod hash;

pub use check::check_mode;
pub use hash::{hash_files, BackendChoice};

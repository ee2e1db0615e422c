//! Command implementations for cluster-cli

pub mod clean;
pub mod hash;
pub mod inventory;

pub use clean::run_clean;
pub use hash::{render_hash_output, run_hash_password};
pub use inventory::{resolve_root, run_inventory};

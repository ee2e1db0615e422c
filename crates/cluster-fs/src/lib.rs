//! Filesystem layer for the cluster inventory
//!
//! Provides root-relative layout resolution, structured config loading,
//! atomic output writes and guarded cleanup of development debris.

pub mod clean;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod layout;
pub mod path;

pub use clean::{CleanOptions, CleanReport, clean, is_protected};
pub use config::ConfigStore;
pub use constants::ClusterPath;
pub use error::{Error, Result};
pub use layout::InventoryLayout;
pub use path::NormalizedPath;

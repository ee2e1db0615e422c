//! The dynamic inventory query

use std::io::Write;
use std::path::{Path, PathBuf};

use cluster_fs::InventoryLayout;
use cluster_inventory::{QueryMode, QueryService};

use crate::error::Result;

/// The explicit root, or the current directory.
pub fn resolve_root(root: Option<&Path>) -> Result<PathBuf> {
    match root {
        Some(root) => Ok(root.to_path_buf()),
        None => Ok(std::env::current_dir()?),
    }
}

/// Answer `mode` for the cluster at `root` on `out`.
///
/// The full document is persisted under `inventory/` in either mode.
pub fn run_inventory<W: Write>(root: &Path, mode: &QueryMode, out: &mut W) -> Result<()> {
    let layout = InventoryLayout::new(root);
    tracing::debug!(root = %layout.root(), ?mode, "Answering inventory query");

    QueryService::new(layout).run(mode, out)?;
    Ok(())
}

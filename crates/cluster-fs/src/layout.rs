//! Cluster root layout
//!
//! Resolves every fixed input and output location from a single root.

use crate::{ClusterPath, NormalizedPath};
use std::path::Path;

/// Root-relative locations used by an inventory run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryLayout {
    root: NormalizedPath,
}

impl InventoryLayout {
    /// Create a layout rooted at `root`.
    ///
    /// The root is canonicalized when it exists so that the paths embedded
    /// in the document do not depend on how the caller spelled them.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let resolved = dunce::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
        Self {
            root: NormalizedPath::new(resolved),
        }
    }

    /// The cluster root directory.
    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// Directory holding the YAML configuration sources.
    pub fn config_dir(&self) -> NormalizedPath {
        self.root.join(ClusterPath::ConfigDir)
    }

    /// Path to a named source inside the config directory, e.g. `nodes.yml`.
    pub fn config_file(&self, file_name: &str) -> NormalizedPath {
        self.config_dir().join(file_name)
    }

    /// The optional `.env` secret file.
    pub fn secrets_file(&self) -> NormalizedPath {
        self.root.join(ClusterPath::SecretsFile)
    }

    /// Where the full document is persisted after each run.
    pub fn output_file(&self) -> NormalizedPath {
        self.root
            .join(ClusterPath::InventoryDir)
            .join(ClusterPath::InventoryFile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_hang_off_the_root() {
        let layout = InventoryLayout::new("/does/not/exist");
        assert_eq!(layout.root().as_str(), "/does/not/exist");
        assert_eq!(layout.config_dir().as_str(), "/does/not/exist/config");
        assert_eq!(
            layout.config_file("nodes.yml").as_str(),
            "/does/not/exist/config/nodes.yml"
        );
        assert_eq!(layout.secrets_file().as_str(), "/does/not/exist/.env");
        assert_eq!(
            layout.output_file().as_str(),
            "/does/not/exist/inventory/inventory.json"
        );
    }

    #[test]
    fn existing_root_is_canonicalized() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a");
        std::fs::create_dir_all(&nested).unwrap();

        let layout = InventoryLayout::new(nested.join(".."));
        let expected = dunce::canonicalize(dir.path()).unwrap();
        assert_eq!(layout.root(), &NormalizedPath::new(expected));
    }
}

//! Fixed path segments of a cluster repository.

use std::path::Path;

/// Well-known locations relative to the cluster root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterPath {
    /// The `config` directory holding the YAML sources
    ConfigDir,
    /// The `.env` secret file
    SecretsFile,
    /// The `inventory` directory
    InventoryDir,
    /// The persisted `inventory.json` document, inside `inventory/`
    InventoryFile,
}

impl ClusterPath {
    /// Get the string representation of the path segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigDir => "config",
            Self::SecretsFile => ".env",
            Self::InventoryDir => "inventory",
            Self::InventoryFile => "inventory.json",
        }
    }
}

impl AsRef<Path> for ClusterPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for ClusterPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ClusterPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! [`TestCluster`] builder for inventory test scenarios.

use cluster_fs::{ClusterPath, InventoryLayout};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Directory of the checked-in sample cluster (`test-fixtures/cluster`).
pub fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/cluster")
}

/// A temporary cluster root with helpers for writing sources and reading
/// the persisted document.
///
/// # Example
///
/// ```rust,no_run
/// use cluster_test_utils::cluster::TestCluster;
///
/// let cluster = TestCluster::new();
/// cluster.write_config("nodes.yml", "nodes:\n  a:\n    role: controller\n");
/// cluster.write_env("CONTROLLER_BECOME_PASSWORD=pw\n");
/// ```
pub struct TestCluster {
    temp_dir: TempDir,
}

impl Default for TestCluster {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCluster {
    /// Create an empty cluster root: no config directory, no secrets.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Create a cluster root holding a copy of the sample configuration.
    pub fn from_fixture() -> Self {
        let cluster = Self::new();
        let source = fixture_dir().join(ClusterPath::ConfigDir);
        for entry in fs::read_dir(&source)
            .unwrap_or_else(|e| panic!("Could not read fixture {}: {}", source.display(), e))
        {
            let entry = entry.unwrap();
            let name = entry.file_name();
            let content = fs::read_to_string(entry.path()).unwrap();
            cluster.write_config(&name.to_string_lossy(), &content);
        }
        cluster
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The layout rooted at this cluster.
    pub fn layout(&self) -> InventoryLayout {
        InventoryLayout::new(self.root())
    }

    /// Write `config/<file_name>`.
    pub fn write_config(&self, file_name: &str, content: &str) {
        let dir = self.root().join(ClusterPath::ConfigDir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file_name), content).unwrap();
    }

    /// Remove `config/<file_name>` if present.
    pub fn remove_config(&self, file_name: &str) {
        let path = self.root().join(ClusterPath::ConfigDir).join(file_name);
        if path.exists() {
            fs::remove_file(path).unwrap();
        }
    }

    /// Write the `.env` secret file.
    pub fn write_env(&self, content: &str) {
        fs::write(self.root().join(ClusterPath::SecretsFile), content).unwrap();
    }

    /// Path of the persisted `inventory/inventory.json`.
    pub fn output_path(&self) -> PathBuf {
        self.root()
            .join(ClusterPath::InventoryDir)
            .join(ClusterPath::InventoryFile)
    }

    /// Raw text of the persisted document.
    ///
    /// # Panics
    /// Panics if the document has not been written.
    pub fn read_output_text(&self) -> String {
        let path = self.output_path();
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read output: {}", path.display()))
    }

    /// The persisted document, parsed.
    pub fn read_output(&self) -> serde_json::Value {
        serde_json::from_str(&self.read_output_text()).unwrap()
    }

    /// Assert that `path` (relative to the cluster root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the cluster root) does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }
}

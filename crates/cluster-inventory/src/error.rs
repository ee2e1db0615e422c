//! Error types for cluster-inventory

use std::path::PathBuf;

/// Result type for cluster-inventory operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort an inventory run
///
/// Missing sources and unknown hosts are not errors; they resolve to empty
/// values before anything here is constructed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration source exists but is not well-formed YAML
    #[error("Failed to parse {source_name} config at {path}: {message}")]
    ConfigParse {
        source_name: String,
        path: PathBuf,
        message: String,
    },

    /// The secret file exists but contains a malformed line
    #[error("Failed to parse secrets at {path}: {message}")]
    SecretParse { path: PathBuf, message: String },

    /// The full document could not be persisted
    #[error("Failed to write inventory to {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: cluster_fs::Error,
    },

    /// An empty password was offered for hashing
    #[error("Empty password not allowed")]
    EmptyPassword,

    /// The password hash could not be computed
    #[error("Password hashing failed: {message}")]
    PasswordHash { message: String },

    /// Filesystem error from cluster-fs
    #[error(transparent)]
    Fs(#[from] cluster_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

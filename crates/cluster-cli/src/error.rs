//! Error types for cluster-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from cluster-inventory
    #[error(transparent)]
    Inventory(#[from] cluster_inventory::Error),

    /// Error from cluster-fs
    #[error(transparent)]
    Fs(#[from] cluster_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Interactive prompt error
    #[error("Interactive prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_displays_message() {
        let error = CliError::user("test error");
        assert_eq!(format!("{}", error), "test error");
    }

    #[test]
    fn inventory_errors_are_transparent() {
        let error = CliError::from(cluster_inventory::Error::EmptyPassword);
        assert_eq!(error.to_string(), "Empty password not allowed");
    }
}

//! Error types for expiring store operations.

/// Error type for expiring store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Generic failure reported by a backend.
    #[error("Backend error: {0}")]
    Backend(String),

    /// SQLite operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A value or envelope could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error (e.g., creating the database directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A blocking backend task panicked or was cancelled.
    #[error("Task error: {0}")]
    Task(String),
}

/// Result type for expiring store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        StoreError::Task(err.to_string())
    }
}

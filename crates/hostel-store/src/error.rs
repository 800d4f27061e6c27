/// Errors from document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The target document does not exist.
    #[error("document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file does not contain a valid collection snapshot.
    #[error("corrupt store file {path}: {reason}")]
    Corrupt { path: String, reason: String },

    /// The backend refused the write.
    #[error("write rejected for {collection}/{id}: {reason}")]
    WriteRejected {
        collection: String,
        id: String,
        reason: String,
    },

    /// Internal lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    LockPoisoned,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

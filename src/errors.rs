use thiserror::Error;

/// Result alias used by every store operation.
pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Lookup miss by id, email, or token.
    #[error("record not found")]
    NotFound,

    /// The email is already registered to another user.
    #[error("email already in use")]
    DuplicateEmail,

    /// The requester does not own the post it tried to delete.
    #[error("requester is not the author")]
    Forbidden,

    /// Reading or replacing the backing file failed.
    #[error("database file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding or decoding the snapshot failed.
    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// True for the errors a caller is expected to handle per request
    /// (missing record, taken email, ownership mismatch); false for the
    /// I/O class, which means the deployment is unhealthy rather than
    /// the request invalid.
    pub fn is_business(&self) -> bool {
        matches!(
            self,
            StoreError::NotFound | StoreError::DuplicateEmail | StoreError::Forbidden
        )
    }
}

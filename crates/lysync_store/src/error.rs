//! Error types for the store boundary.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur at the store boundary.
#[derive(Error, Debug)]
pub enum StoreError {
    /// An insert collided with an existing unique key.
    #[error("duplicate key {key:?} in {kind}")]
    DuplicateKey {
        /// Entity kind.
        kind: String,
        /// Offending unique key.
        key: String,
    },

    /// An update targeted a row that does not exist.
    #[error("no entity with key {key:?} in {kind}")]
    NotFound {
        /// Entity kind.
        kind: String,
        /// Missing unique key.
        key: String,
    },

    /// The transactional commit failed; the run's mutations were rolled
    /// back.
    #[error("commit failed: {0}")]
    CommitFailed(String),

    /// A backend-level failure (connection, constraint, I/O).
    #[error("backend error: {0}")]
    Backend(String),
}

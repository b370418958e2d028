//! Error types for the sync engine.

use lysync_client::HttpError;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors the sync engine can surface to its caller.
///
/// Deliberately small: a run converts record-level and commit failures
/// into counters on the returned stats, so only construction-time problems
/// appear here.
#[derive(Error, Debug)]
pub enum SyncError {
    /// A required connection parameter is missing or empty.
    #[error("missing required configuration: {0}")]
    MissingConfig(&'static str),

    /// Building the HTTP client failed.
    #[error("http client error: {0}")]
    Http(#[from] HttpError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SyncError::MissingConfig("base_url");
        assert!(err.to_string().contains("base_url"));
    }
}

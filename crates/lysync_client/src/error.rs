//! Error types for the HTTP layer.

use thiserror::Error;

/// Errors an [`HttpClient`](crate::HttpClient) call can produce.
///
/// The fetcher converts any of these into early pagination termination;
/// they never escape a fetch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// The server answered with a non-success status.
    #[error("HTTP {status}")]
    Status {
        /// Response status code.
        status: u16,
    },

    /// The request timed out.
    #[error("request timed out")]
    Timeout,

    /// Connection or protocol failure.
    #[error("transport error: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(HttpError::Status { status: 503 }.to_string(), "HTTP 503");
        assert!(HttpError::Transport("refused".into())
            .to_string()
            .contains("refused"));
    }
}

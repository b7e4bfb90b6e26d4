//! Error types for the contributor fetch.
//!
//! Every variant aborts the run; nothing is retried and no output is
//! written after a failure.

use thiserror::Error;

/// Errors that can occur while fetching contributor lists.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} timed out after {seconds}s")]
    Timeout { url: String, seconds: u64 },

    #[error("GitHub API error {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to parse contributor list from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = FetchError::Status {
            url: "https://api.github.com/repos/a/b/contributors".to_string(),
            status: reqwest::StatusCode::FORBIDDEN,
        };
        assert_eq!(
            err.to_string(),
            "GitHub API error 403 Forbidden for https://api.github.com/repos/a/b/contributors"
        );
    }

    #[test]
    fn test_timeout_error_message() {
        let err = FetchError::Timeout {
            url: "http://localhost/x".to_string(),
            seconds: 30,
        };
        assert!(err.to_string().contains("timed out after 30s"));
    }
}

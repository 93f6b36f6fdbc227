//! Error types for the relay client

use std::time::Duration;

use metarelay_core::CoreError;
use thiserror::Error;

/// Result type alias for relay operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while relaying to the metadata API
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed below the HTTP layer (connect, reset, read)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Remote answered a submission with a non-success status
    #[error("Upstream error (status {status}): {body}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Raw response body, verbatim
        body: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Job stayed non-terminal past the poll budget
    #[error("Job {handle} still running after {attempts} status check(s) over {elapsed:?}")]
    Timeout {
        handle: String,
        attempts: u32,
        elapsed: Duration,
    },

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an upstream error from status code and raw body
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            body: body.into(),
        }
    }

    /// Check if this error is a transport failure worth retrying while polling
    ///
    /// Connect, timeout, send and body-read failures qualify. Request build
    /// and decode errors would fail the same way again.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RequestFailed(e) => {
                e.is_connect() || e.is_timeout() || e.is_request() || e.is_body()
            }
            _ => false,
        }
    }

    /// Check if this error is a timeout of the poll loop
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::InvalidRequest(msg),
            other => Self::ParseError(other.to_string()),
        }
    }
}

//! Error types for core operations

use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while validating requests or reading SOAP responses
#[derive(Debug, Error)]
pub enum CoreError {
    /// Caller-supplied parameters are unusable
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Response body is not well-formed XML
    #[error("Malformed XML response: {0}")]
    MalformedXml(String),

    /// An element the relay needs is absent from the response
    #[error("Missing element in response: {0}")]
    MissingElement(String),
}

impl CoreError {
    /// Check if this error came from reading a response (as opposed to validating input)
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::MalformedXml(_) | Self::MissingElement(_))
    }
}

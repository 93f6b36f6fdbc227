//! Caller session

use crate::error::{CoreError, Result};

/// API version used when the caller does not name one
pub const DEFAULT_API_VERSION: &str = "58.0";

/// Connection details supplied by the caller on every request
///
/// The session id is forwarded untouched inside the SOAP header; the relay
/// never validates or stores it.
#[derive(Clone)]
pub struct Session {
    pub instance_url: String,
    pub session_id: String,
    pub api_version: String,
}

impl Session {
    pub fn new(
        instance_url: impl Into<String>,
        session_id: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            instance_url: instance_url.into(),
            session_id: session_id.into(),
            api_version: api_version.into(),
        }
    }

    /// Versioned SOAP endpoint for this session
    pub fn endpoint(&self) -> String {
        format!(
            "{}/services/Soap/m/{}",
            self.instance_url.trim_end_matches('/'),
            self.api_version
        )
    }

    /// Validates the session before anything is sent upstream
    pub fn validate(&self) -> Result<()> {
        if self.instance_url.is_empty() {
            return Err(CoreError::Validation(
                "instanceUrl cannot be empty".to_string(),
            ));
        }

        if !self.instance_url.starts_with("http://") && !self.instance_url.starts_with("https://")
        {
            return Err(CoreError::Validation(
                "instanceUrl must start with http:// or https://".to_string(),
            ));
        }

        if self.session_id.trim().is_empty() {
            return Err(CoreError::Validation(
                "sessionId cannot be empty".to_string(),
            ));
        }

        if self.api_version.trim().is_empty() {
            return Err(CoreError::Validation(
                "apiVersion cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

// Keeps the credential out of logs.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("instance_url", &self.instance_url)
            .field("session_id", &"<redacted>")
            .field("api_version", &self.api_version)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let session = Session::new("https://example.my.salesforce.com", "00D!abc", "58.0");
        assert_eq!(
            session.endpoint(),
            "https://example.my.salesforce.com/services/Soap/m/58.0"
        );
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let session = Session::new("https://example.my.salesforce.com/", "00D!abc", "60.0");
        assert_eq!(
            session.endpoint(),
            "https://example.my.salesforce.com/services/Soap/m/60.0"
        );
    }

    #[test]
    fn test_session_validation() {
        let mut session = Session::new("https://example.com", "token", DEFAULT_API_VERSION);
        assert!(session.validate().is_ok());

        session.instance_url = "example.com".to_string();
        assert!(session.validate().is_err());

        session.instance_url = "https://example.com".to_string();
        session.session_id = "  ".to_string();
        assert!(session.validate().is_err());

        session.session_id = "token".to_string();
        session.api_version = String::new();
        assert!(session.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_session_id() {
        let session = Session::new("https://example.com", "super-secret", "58.0");
        let rendered = format!("{:?}", session);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}

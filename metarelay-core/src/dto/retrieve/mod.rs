//! Retrieve DTOs

use serde::{Deserialize, Serialize};

use crate::domain::session::Session;

/// Request to retrieve metadata and stream back the resulting archive
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveRequest {
    pub instance_url: String,
    pub session_id: String,
    #[serde(default = "super::default_api_version")]
    pub api_version: String,
    /// Inner XML of the `<unpackaged>` node, inserted verbatim
    pub unpackaged_xml: String,
}

impl RetrieveRequest {
    pub fn session(&self) -> Session {
        Session::new(&self.instance_url, &self.session_id, &self.api_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_version_defaults() {
        let req: RetrieveRequest = serde_json::from_value(serde_json::json!({
            "instanceUrl": "https://example.com",
            "sessionId": "token",
            "unpackagedXml": "<types><members>*</members><name>ApexClass</name></types>"
        }))
        .unwrap();

        assert_eq!(req.api_version, "58.0");
        assert_eq!(
            req.session().endpoint(),
            "https://example.com/services/Soap/m/58.0"
        );
    }
}

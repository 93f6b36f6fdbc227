//! Deploy DTOs

use serde::{Deserialize, Serialize};

use crate::domain::job::JobHandle;
use crate::domain::session::Session;
use crate::envelope::DeployOptions;

/// Request to deploy a base64-encoded zip archive
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployRequest {
    pub instance_url: String,
    pub session_id: String,
    #[serde(default = "super::default_api_version")]
    pub api_version: String,
    pub zip_base64: String,
    #[serde(default = "default_test_level")]
    pub test_level: String,
    #[serde(default)]
    pub test_classes: Vec<String>,
    #[serde(default = "default_check_only")]
    pub check_only: bool,
}

fn default_test_level() -> String {
    "NoTestRun".to_string()
}

fn default_check_only() -> bool {
    true
}

impl DeployRequest {
    pub fn session(&self) -> Session {
        Session::new(&self.instance_url, &self.session_id, &self.api_version)
    }

    /// Deploy options derived from the request; everything else keeps its default
    pub fn options(&self) -> DeployOptions {
        DeployOptions {
            check_only: self.check_only,
            test_level: self.test_level.clone(),
            run_tests: self.test_classes.clone(),
            ..DeployOptions::default()
        }
    }
}

/// Response for a started deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployResponse {
    pub job_id: JobHandle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let req: DeployRequest = serde_json::from_value(serde_json::json!({
            "instanceUrl": "https://example.com",
            "sessionId": "token",
            "zipBase64": "UEsDBA=="
        }))
        .unwrap();

        assert_eq!(req.api_version, "58.0");
        assert_eq!(req.test_level, "NoTestRun");
        assert!(req.test_classes.is_empty());
        assert!(req.check_only);
    }

    #[test]
    fn test_options_carry_request_fields() {
        let req: DeployRequest = serde_json::from_value(serde_json::json!({
            "instanceUrl": "https://example.com",
            "sessionId": "token",
            "zipBase64": "UEsDBA==",
            "testLevel": "RunSpecifiedTests",
            "testClasses": ["AccountTest", "ContactTest"],
            "checkOnly": false
        }))
        .unwrap();

        let options = req.options();
        assert!(!options.check_only);
        assert_eq!(options.test_level, "RunSpecifiedTests");
        assert_eq!(options.run_tests, vec!["AccountTest", "ContactTest"]);
        assert!(options.rollback_on_error);
    }

    #[test]
    fn test_response_uses_job_id_key() {
        let response = DeployResponse {
            job_id: JobHandle::new("0Af000000000001"),
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({ "jobId": "0Af000000000001" })
        );
    }
}

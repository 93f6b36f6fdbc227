//! Deploy status DTOs

use serde::{Deserialize, Serialize};

use crate::domain::session::Session;

/// Query string for a deploy status check
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusQuery {
    pub instance_url: String,
    pub session_id: String,
    #[serde(default = "super::default_api_version")]
    pub api_version: String,
    /// Poll server-side until the deployment reaches a terminal status
    #[serde(default)]
    pub wait: bool,
}

impl StatusQuery {
    pub fn session(&self) -> Session {
        Session::new(&self.instance_url, &self.session_id, &self.api_version)
    }
}

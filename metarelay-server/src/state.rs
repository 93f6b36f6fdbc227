//! Shared application state

use std::time::Duration;

use anyhow::Context;
use metarelay_client::{MetadataClient, PollPolicy};
use metarelay_core::domain::session::Session;
use reqwest::Client;

use crate::config::Config;

/// State injected into every handler
///
/// Holds only immutable configuration and the reqwest connection pool;
/// nothing here is mutated by requests.
#[derive(Debug, Clone)]
pub struct AppState {
    http: Client,
    policy: PollPolicy,
}

impl AppState {
    pub fn new(http: Client, policy: PollPolicy) -> Self {
        Self { http, policy }
    }

    /// Builds the HTTP client and poll policy from configuration
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::new(http, config.poll_policy()))
    }

    pub fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Client scoped to one caller request
    pub fn metadata_client(&self, session: Session) -> metarelay_client::Result<MetadataClient> {
        MetadataClient::with_client(session, self.http.clone(), self.policy.clone())
    }
}

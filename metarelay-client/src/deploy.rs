//! Metadata deploy and deploy status

use metarelay_core::domain::job::{JobHandle, JobStatus};
use metarelay_core::envelope::{
    DeployOptions, Envelope, Operation, extract_async_id, read_status,
};

use crate::MetadataClient;
use crate::error::Result;
use crate::relay::{JobPolling, JobSubmission};
use crate::stream::RelayStream;
use crate::transport::Transport;

/// `deploy()` call for a base64 zip archive
pub struct DeploySubmission<'a> {
    pub session_id: &'a str,
    pub zip_file: &'a str,
    pub options: &'a DeployOptions,
}

impl JobSubmission for DeploySubmission<'_> {
    fn request_body(&self) -> String {
        Envelope::new(
            self.session_id,
            Operation::Deploy {
                zip_file: self.zip_file,
                options: self.options,
            },
        )
        .render()
    }

    fn parse_handle(&self, body: &str) -> Result<JobHandle> {
        Ok(extract_async_id(body, "deployResponse")?)
    }
}

/// `checkDeployStatus()` polling; component details only on the fetch
pub struct DeployPolling<'a> {
    pub session_id: &'a str,
}

impl DeployPolling<'_> {
    fn body(&self, handle: &JobHandle, include_details: bool) -> String {
        Envelope::new(
            self.session_id,
            Operation::CheckDeployStatus {
                async_process_id: handle.as_str(),
                include_details,
            },
        )
        .render()
    }
}

impl JobPolling for DeployPolling<'_> {
    fn probe_body(&self, handle: &JobHandle) -> String {
        self.body(handle, false)
    }

    fn fetch_body(&self, handle: &JobHandle) -> String {
        self.body(handle, true)
    }

    fn classify(&self, body: &str) -> JobStatus {
        read_status(body, "checkDeployStatusResponse")
    }
}

impl<T: Transport> MetadataClient<T> {
    /// Start a deployment and return its job handle
    ///
    /// # Arguments
    /// * `zip_base64` - Base64-encoded deployment archive
    /// * `options` - Deploy options (check-only, test level, tests to run)
    pub async fn deploy(&self, zip_base64: &str, options: &DeployOptions) -> Result<JobHandle> {
        self.relay()
            .submit(&DeploySubmission {
                session_id: &self.session().session_id,
                zip_file: zip_base64,
                options,
            })
            .await
    }

    /// Check a deployment once and stream the detailed reply back verbatim
    pub async fn deploy_status(&self, handle: &JobHandle) -> Result<RelayStream> {
        let polling = DeployPolling {
            session_id: &self.session().session_id,
        };
        self.relay().forward(polling.fetch_body(handle)).await
    }

    /// Poll a deployment until it finishes, then stream the detailed reply
    pub async fn await_deploy(&self, handle: &JobHandle) -> Result<RelayStream> {
        let polling = DeployPolling {
            session_id: &self.session().session_id,
        };
        self.relay().await_completion(&polling, handle).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::PollPolicy;
    use crate::testing::{ScriptedTransport, ok};
    use crate::transport::UpstreamReply;
    use metarelay_core::domain::session::Session;

    fn client(replies: Vec<Result<UpstreamReply>>) -> MetadataClient<ScriptedTransport> {
        MetadataClient::with_transport(
            Session::new("https://example.com", "token", "58.0"),
            ScriptedTransport::new(replies),
            PollPolicy::default(),
        )
    }

    fn deploy_status_reply(status: &str) -> String {
        format!(
            r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns="http://soap.sforce.com/2006/04/metadata"><soapenv:Body><checkDeployStatusResponse><result><id>0Af1</id><status>{status}</status></result></checkDeployStatusResponse></soapenv:Body></soapenv:Envelope>"#
        )
    }

    #[tokio::test]
    async fn test_deploy_returns_job_id() {
        let reply = r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns="http://soap.sforce.com/2006/04/metadata"><soapenv:Body><deployResponse><result><done>false</done><id>0Af5g00000ABCDE</id><state>Queued</state></result></deployResponse></soapenv:Body></soapenv:Envelope>"#;
        let client = client(vec![ok(reply)]);
        let options = DeployOptions {
            run_tests: vec!["AccountTest".to_string()],
            test_level: "RunSpecifiedTests".to_string(),
            ..DeployOptions::default()
        };

        let handle = client.deploy("UEsDBA==", &options).await.unwrap();

        assert_eq!(handle.as_str(), "0Af5g00000ABCDE");
        let calls = client.relay().transport().calls();
        assert!(calls[0].contains("<met:zipFile>UEsDBA==</met:zipFile>"));
        assert!(calls[0].contains("<met:runTests>AccountTest</met:runTests>"));
    }

    #[tokio::test]
    async fn test_deploy_status_is_single_forward() {
        let client = client(vec![]);

        client
            .deploy_status(&JobHandle::new("0Af1"))
            .await
            .unwrap();

        let transport = client.relay().transport();
        assert!(transport.calls().is_empty());
        let opened = transport.opened();
        assert_eq!(opened.len(), 1);
        assert!(opened[0].contains("<met:checkDeployStatus>"));
        assert!(opened[0].contains("<met:includeDetails>true</met:includeDetails>"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_await_deploy_stops_on_unrecognised_status() {
        let client = client(vec![
            ok(&deploy_status_reply("Pending")),
            ok(&deploy_status_reply("Canceling")),
        ]);

        client.await_deploy(&JobHandle::new("0Af1")).await.unwrap();

        let transport = client.relay().transport();
        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].contains("<met:includeDetails>false</met:includeDetails>"));
        assert_eq!(transport.opened().len(), 1);
    }
}

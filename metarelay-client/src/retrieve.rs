//! Metadata retrieve

use metarelay_core::domain::job::{JobHandle, JobStatus};
use metarelay_core::envelope::{Envelope, Operation, extract_async_id, read_status};

use crate::MetadataClient;
use crate::error::Result;
use crate::relay::{JobPolling, JobSubmission};
use crate::stream::RelayStream;
use crate::transport::Transport;

/// `retrieve()` call for an unpackaged manifest
pub struct RetrieveSubmission<'a> {
    pub session_id: &'a str,
    pub api_version: &'a str,
    pub unpackaged: &'a str,
}

impl JobSubmission for RetrieveSubmission<'_> {
    fn request_body(&self) -> String {
        Envelope::new(
            self.session_id,
            Operation::Retrieve {
                api_version: self.api_version,
                unpackaged: self.unpackaged,
            },
        )
        .render()
    }

    fn parse_handle(&self, body: &str) -> Result<JobHandle> {
        Ok(extract_async_id(body, "retrieveResponse")?)
    }
}

/// `checkRetrieveStatus()` polling
///
/// The remote deletes the archive once a status call has returned it, so
/// probes leave the zip out and only the final fetch asks for it.
pub struct RetrievePolling<'a> {
    pub session_id: &'a str,
}

impl RetrievePolling<'_> {
    fn body(&self, handle: &JobHandle, include_zip: bool) -> String {
        Envelope::new(
            self.session_id,
            Operation::CheckRetrieveStatus {
                async_process_id: handle.as_str(),
                include_zip,
            },
        )
        .render()
    }
}

impl JobPolling for RetrievePolling<'_> {
    fn probe_body(&self, handle: &JobHandle) -> String {
        self.body(handle, false)
    }

    fn fetch_body(&self, handle: &JobHandle) -> String {
        self.body(handle, true)
    }

    fn classify(&self, body: &str) -> JobStatus {
        read_status(body, "checkRetrieveStatusResponse")
    }
}

impl<T: Transport> MetadataClient<T> {
    /// Retrieve metadata and stream back the final status response
    ///
    /// The streamed body is the raw `checkRetrieveStatus` reply carrying the
    /// base64 `zipFile`; it is never buffered here.
    ///
    /// # Arguments
    /// * `unpackaged_xml` - Inner XML of the `<unpackaged>` manifest
    pub async fn retrieve(&self, unpackaged_xml: &str) -> Result<RelayStream> {
        let session = self.session();
        let handle = self
            .relay()
            .submit(&RetrieveSubmission {
                session_id: &session.session_id,
                api_version: &session.api_version,
                unpackaged: unpackaged_xml,
            })
            .await?;

        let polling = RetrievePolling {
            session_id: &session.session_id,
        };
        self.relay().await_completion(&polling, &handle).await
    }
}

//! Metarelay Client
//!
//! Relays metadata API calls: builds the SOAP request, forwards it, polls
//! asynchronous jobs until they finish and streams the final reply back
//! without buffering it.
//!
//! The polling machinery in [`relay`] is independent of the metadata API;
//! [`MetadataClient`] wires it to the retrieve and deploy operations.
//!
//! # Example
//!
//! ```no_run
//! use futures_util::StreamExt;
//! use metarelay_client::{MetadataClient, PollPolicy};
//! use metarelay_core::domain::session::Session;
//!
//! # async fn example() -> metarelay_client::Result<()> {
//! let session = Session::new("https://example.my.salesforce.com", "00D...", "58.0");
//! let client = MetadataClient::with_client(session, reqwest::Client::new(), PollPolicy::default())?;
//!
//! let mut stream = client
//!     .retrieve("<types><members>*</members><name>ApexClass</name></types>")
//!     .await?;
//!
//! while let Some(chunk) = stream.next().await {
//!     let chunk = chunk?;
//!     println!("{} bytes", chunk.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod deploy;
pub mod error;
pub mod relay;
pub mod retrieve;
pub mod stream;
pub mod transport;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use relay::{JobPolling, JobSubmission, PollPolicy, Relay, RetryPolicy};
pub use stream::RelayStream;
pub use transport::{HttpTransport, Transport, UpstreamReply};

use metarelay_core::domain::session::Session;
use reqwest::Client;

/// Client for one caller's metadata API session
///
/// Built per caller request and dropped with it. The HTTP connection pool
/// is passed in, not owned globally.
#[derive(Debug)]
pub struct MetadataClient<T = HttpTransport> {
    session: Session,
    relay: Relay<T>,
}

impl MetadataClient<HttpTransport> {
    /// Create a client over a shared reqwest connection pool
    ///
    /// Fails with `InvalidRequest` if the session is unusable; nothing is
    /// sent in that case.
    ///
    /// # Arguments
    /// * `session` - Instance URL, session id and API version from the caller
    /// * `client` - A configured reqwest Client
    /// * `policy` - Poll interval and bounds for asynchronous jobs
    pub fn with_client(session: Session, client: Client, policy: PollPolicy) -> Result<Self> {
        session.validate()?;
        let transport = HttpTransport::new(client, session.endpoint());
        Ok(Self::with_transport(session, transport, policy))
    }
}

impl<T: Transport> MetadataClient<T> {
    /// Create a client over any transport
    pub fn with_transport(session: Session, transport: T, policy: PollPolicy) -> Self {
        Self {
            session,
            relay: Relay::new(transport, policy),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn relay(&self) -> &Relay<T> {
        &self.relay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_targets_versioned_endpoint() {
        let session = Session::new("https://example.com/", "token", "60.0");
        let client = MetadataClient::with_client(session, Client::new(), PollPolicy::default())
            .unwrap();
        assert_eq!(
            client.relay().transport().endpoint(),
            "https://example.com/services/Soap/m/60.0"
        );
    }

    #[test]
    fn test_client_rejects_invalid_session() {
        let session = Session::new("example.com", "token", "58.0");
        let err = MetadataClient::with_client(session, Client::new(), PollPolicy::default())
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }
}

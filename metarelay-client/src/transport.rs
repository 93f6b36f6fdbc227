//! Transport seam
//!
//! The relay only ever POSTs a body to one endpoint, either reading the
//! reply as text or opening it as a stream. `HttpTransport` does this over
//! reqwest; tests substitute scripted transports.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::error::Result;
use crate::stream::RelayStream;

/// A buffered upstream reply
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: String,
}

impl UpstreamReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends request bodies to a single remote endpoint
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a body and buffers the whole reply as text
    ///
    /// Any HTTP status is returned as a reply; only failures below HTTP
    /// are errors.
    async fn call(&self, body: String) -> Result<UpstreamReply>;

    /// Sends a body and returns the reply unread, as a stream of chunks
    async fn open(&self, body: String) -> Result<RelayStream>;
}

/// HTTP implementation of `Transport` for SOAP endpoints
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    /// Creates a transport posting to `endpoint` through a shared client
    ///
    /// # Arguments
    /// * `client` - Connection pool, usually injected from server state
    /// * `endpoint` - Full SOAP endpoint URL
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn soap_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/xml; charset=UTF-8"),
        );
        headers.insert("SOAPAction", HeaderValue::from_static("\"\""));
        headers
    }

    async fn send(&self, body: String) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(&self.endpoint)
            .headers(Self::soap_headers())
            .body(body)
            .send()
            .await?;
        Ok(response)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, body: String) -> Result<UpstreamReply> {
        let response = self.send(body).await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(UpstreamReply { status, body })
    }

    async fn open(&self, body: String) -> Result<RelayStream> {
        let response = self.send(body).await?;

        if !response.status().is_success() {
            tracing::warn!(
                "Streaming upstream reply with status {} from {}",
                response.status(),
                self.endpoint
            );
        }

        Ok(RelayStream::from_response(response))
    }
}

//! Relay stream
//!
//! Upstream body forwarded chunk by chunk. Only one chunk is held at a
//! time; dropping the stream drops the upstream response and releases its
//! connection.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_util::stream::{BoxStream, Stream, StreamExt};

use crate::error::ClientError;

/// Raw upstream response body plus the status it was sent with
pub struct RelayStream {
    status: u16,
    chunks: BoxStream<'static, Result<Bytes, ClientError>>,
}

impl RelayStream {
    pub fn new<S>(status: u16, chunks: S) -> Self
    where
        S: Stream<Item = Result<Bytes, ClientError>> + Send + 'static,
    {
        Self {
            status,
            chunks: chunks.boxed(),
        }
    }

    /// Wrap a `reqwest` response without reading its body
    pub fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        Self::new(
            status,
            response.bytes_stream().map(|chunk| chunk.map_err(ClientError::from)),
        )
    }

    /// HTTP status the upstream answered with
    pub fn status(&self) -> u16 {
        self.status
    }
}

impl Stream for RelayStream {
    type Item = Result<Bytes, ClientError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.chunks.as_mut().poll_next(cx)
    }
}

impl std::fmt::Debug for RelayStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayStream")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

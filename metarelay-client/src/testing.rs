//! Scripted transport shared by unit tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::{StreamExt, stream};

use crate::error::{ClientError, Result};
use crate::stream::RelayStream;
use crate::transport::{Transport, UpstreamReply};

pub const CHUNKS: [&[u8]; 3] = [b"<soapenv:Envelope>", b"<zipFile>UEsDBBQ=", b"</zipFile>"];

/// Replays canned replies in order and records every body it was sent
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<UpstreamReply>>>,
    calls: Mutex<Vec<String>>,
    opened: Mutex<Vec<String>>,
    failed_opens: Mutex<VecDeque<ClientError>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Result<UpstreamReply>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
            opened: Mutex::new(Vec::new()),
            failed_opens: Mutex::new(VecDeque::new()),
        }
    }

    /// Fail the next `open` calls with these errors, in order
    pub fn with_failed_opens(self, errors: Vec<ClientError>) -> Self {
        *self.failed_opens.lock().unwrap() = errors.into();
        self
    }

    /// Bodies sent through `call`, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Bodies sent through `open`, in order
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn call(&self, body: String) -> Result<UpstreamReply> {
        self.calls.lock().unwrap().push(body);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted reply left")
    }

    async fn open(&self, body: String) -> Result<RelayStream> {
        self.opened.lock().unwrap().push(body);
        if let Some(err) = self.failed_opens.lock().unwrap().pop_front() {
            return Err(err);
        }
        let chunks = CHUNKS.iter().map(|c| Ok(Bytes::from_static(c)));
        Ok(RelayStream::new(200, stream::iter(chunks)))
    }
}

pub fn ok(body: &str) -> Result<UpstreamReply> {
    Ok(UpstreamReply::new(200, body))
}

/// A real connection failure: nothing listens on port 1
pub async fn connect_failure() -> ClientError {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let err = client.post("http://127.0.0.1:1/").send().await.unwrap_err();
    ClientError::from(err)
}

pub async fn transport_failure() -> Result<UpstreamReply> {
    Err(connect_failure().await)
}

pub async fn collect(stream: RelayStream) -> Vec<u8> {
    stream
        .map(|chunk| chunk.unwrap())
        .collect::<Vec<Bytes>>()
        .await
        .concat()
}

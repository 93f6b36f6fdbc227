//! Poll-until-ready relay
//!
//! Generic over the transport and over the operation being relayed:
//! a `JobSubmission` knows how to start a job and read its handle back,
//! a `JobPolling` knows how to ask for status and how to read it.
//!
//! The relay keeps no state between calls. Each caller request drives
//! `submit` then `await_completion` (or `forward`) on its own task.

use std::future::Future;
use std::time::Duration;

use metarelay_core::domain::job::{JobHandle, JobStatus};
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

use crate::error::{ClientError, Result};
use crate::stream::RelayStream;
use crate::transport::Transport;

/// Starts a remote job
pub trait JobSubmission: Send + Sync {
    /// Body of the initiating request
    fn request_body(&self) -> String;

    /// Reads the job handle out of a successful reply
    fn parse_handle(&self, body: &str) -> Result<JobHandle>;
}

/// Checks on a remote job
pub trait JobPolling: Send + Sync {
    /// Body of a lightweight status check
    fn probe_body(&self, handle: &JobHandle) -> String;

    /// Body of the final status check whose reply is streamed to the caller
    fn fetch_body(&self, handle: &JobHandle) -> String;

    /// Reads the job status out of a probe reply
    fn classify(&self, body: &str) -> JobStatus;
}

/// Bounded exponential backoff for transport failures while polling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Never retry
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
        }
    }
}

/// How often and for how long to poll a job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    /// Fixed delay between status checks
    pub interval: Duration,
    /// Give up once another delay would exceed this much total time
    pub max_wait: Option<Duration>,
    /// Give up after this many non-terminal status checks
    pub max_attempts: Option<u32>,
    pub retry: RetryPolicy,
}

impl PollPolicy {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_max_wait(mut self, max_wait: Option<Duration>) -> Self {
        self.max_wait = max_wait;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            max_wait: Some(Duration::from_secs(600)),
            max_attempts: None,
            retry: RetryPolicy::default(),
        }
    }
}

/// Relay over a single transport
#[derive(Debug, Clone)]
pub struct Relay<T> {
    transport: T,
    policy: PollPolicy,
}

impl<T: Transport> Relay<T> {
    pub fn new(transport: T, policy: PollPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Start a remote job and return its handle
    ///
    /// A non-success reply fails with `Upstream` carrying the raw body; no
    /// handle is read from it. Submissions are never retried.
    pub async fn submit<S>(&self, submission: &S) -> Result<JobHandle>
    where
        S: JobSubmission + ?Sized,
    {
        let reply = self.transport.call(submission.request_body()).await?;

        if !reply.is_success() {
            warn!("Submission rejected with status {}", reply.status);
            return Err(ClientError::upstream(reply.status, reply.body));
        }

        let handle = submission.parse_handle(&reply.body)?;
        info!("Submitted job {}", handle);

        Ok(handle)
    }

    /// Poll until the job leaves its non-terminal states, then stream the result
    ///
    /// Probes are spaced by the policy interval. The first terminal probe
    /// ends polling and exactly one fetch is opened as a stream.
    pub async fn await_completion<P>(&self, polling: &P, handle: &JobHandle) -> Result<RelayStream>
    where
        P: JobPolling + ?Sized,
    {
        let started = Instant::now();
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;

            let probe = polling.probe_body(handle);
            let reply = self
                .retry_transient("Status check", || self.transport.call(probe.clone()))
                .await?;
            let status = polling.classify(&reply.body);

            if status.is_terminal() {
                info!(
                    "Job {} reached status {} after {} check(s)",
                    handle, status, attempts
                );
                break;
            }

            debug!("Job {} is {} (check {})", handle, status, attempts);

            let elapsed = started.elapsed();
            let out_of_attempts = self.policy.max_attempts.is_some_and(|max| attempts >= max);
            let out_of_time = self
                .policy
                .max_wait
                .is_some_and(|max| elapsed + self.policy.interval > max);

            if out_of_attempts || out_of_time {
                warn!(
                    "Giving up on job {} after {} check(s) over {:?}",
                    handle, attempts, elapsed
                );
                return Err(ClientError::Timeout {
                    handle: handle.to_string(),
                    attempts,
                    elapsed,
                });
            }

            time::sleep(self.policy.interval).await;
        }

        info!("Streaming result of job {}", handle);
        let fetch = polling.fetch_body(handle);
        self.retry_transient("Result fetch", || self.transport.open(fetch.clone()))
            .await
    }

    /// Send one request and stream the reply back untouched
    pub async fn forward(&self, body: String) -> Result<RelayStream> {
        self.transport.open(body).await
    }

    /// Run a request, retrying transport failures within the retry budget
    ///
    /// Retries never count as status checks.
    async fn retry_transient<R, F, Fut>(&self, what: &str, mut request: F) -> Result<R>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<R>>,
    {
        let retry = &self.policy.retry;
        let mut retries = 0;
        let mut delay = retry.initial_delay;

        loop {
            match request().await {
                Ok(reply) => return Ok(reply),
                Err(e) if e.is_transient() && retries < retry.max_retries => {
                    retries += 1;
                    warn!(
                        "{} failed (retry {}/{}): {}",
                        what, retries, retry.max_retries, e
                    );
                    warn!("Retrying in {:?}...", delay);

                    time::sleep(delay).await;

                    delay = (delay * 2).min(retry.max_delay);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

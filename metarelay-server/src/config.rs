//! Server configuration
//!
//! Every setting is a command-line flag that can also come from the
//! environment, so the same binary runs locally and in a container.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use metarelay_client::{PollPolicy, RetryPolicy};

/// Server configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "metarelay")]
#[command(about = "Relay for metadata API retrieve/deploy calls", long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "METARELAY_BIND_ADDR", default_value = "0.0.0.0:8000")]
    pub bind_addr: String,

    /// Directory holding index.html and the frontend assets
    #[arg(long, env = "METARELAY_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Seconds between job status checks
    #[arg(long, env = "METARELAY_POLL_INTERVAL_SECS", default_value_t = 3)]
    pub poll_interval_secs: u64,

    /// Longest a single request may spend polling, in seconds (0 = no limit)
    #[arg(long, env = "METARELAY_MAX_POLL_WAIT_SECS", default_value_t = 600)]
    pub max_poll_wait_secs: u64,

    /// Most status checks per job before giving up
    #[arg(long, env = "METARELAY_MAX_POLL_ATTEMPTS")]
    pub max_poll_attempts: Option<u32>,

    /// Retries for a status check that fails below HTTP
    #[arg(long, env = "METARELAY_TRANSPORT_RETRIES", default_value_t = 3)]
    pub transport_retries: u32,

    /// Upstream connect timeout in seconds
    #[arg(long, env = "METARELAY_CONNECT_TIMEOUT_SECS", default_value_t = 30)]
    pub connect_timeout_secs: u64,

    /// Largest accepted request body in megabytes (deploy archives are inline)
    #[arg(long, env = "METARELAY_MAX_BODY_MB", default_value_t = 64)]
    pub max_body_mb: usize,

    /// Allow cross-origin requests from any origin
    #[arg(long, env = "METARELAY_CORS_PERMISSIVE")]
    pub cors_permissive: bool,
}

impl Config {
    /// Poll policy handed to every relay
    pub fn poll_policy(&self) -> PollPolicy {
        let max_wait = match self.max_poll_wait_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        PollPolicy::default()
            .with_interval(Duration::from_secs(self.poll_interval_secs))
            .with_max_wait(max_wait)
            .with_max_attempts(self.max_poll_attempts)
            .with_retry(RetryPolicy {
                max_retries: self.transport_retries,
                ..RetryPolicy::default()
            })
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_body_mb.saturating_mul(1024 * 1024)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        if self.poll_interval_secs == 0 {
            anyhow::bail!("poll_interval_secs must be greater than 0");
        }

        if self.max_poll_wait_secs != 0 && self.max_poll_wait_secs < self.poll_interval_secs {
            anyhow::bail!("max_poll_wait_secs must be at least one poll interval (or 0)");
        }

        if self.max_poll_attempts == Some(0) {
            anyhow::bail!("max_poll_attempts must be greater than 0");
        }

        if self.max_body_mb == 0 {
            anyhow::bail!("max_body_mb must be greater than 0");
        }

        Ok(())
    }
}

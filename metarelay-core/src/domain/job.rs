//! Job domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of an asynchronous remote operation
///
/// Returned by the remote system when a retrieve or deploy is started and
/// passed back on every status check. The value is never inspected or altered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobHandle(String);

impl JobHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for JobHandle {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for JobHandle {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Remote job status
///
/// Only `Pending` and `InProgress` keep the relay polling. Labels the relay
/// has no dedicated variant for (`SucceededPartial`, `Canceling`, `Canceled`, ...)
/// are kept verbatim in `Unknown` and are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    InProgress,
    Succeeded,
    Failed,
    Unknown(String),
}

impl JobStatus {
    /// Map a remote status label onto a variant
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Pending" => JobStatus::Pending,
            "InProgress" => JobStatus::InProgress,
            "Succeeded" => JobStatus::Succeeded,
            "Failed" => JobStatus::Failed,
            other => JobStatus::Unknown(other.to_string()),
        }
    }

    /// Fallback classification by substring match on the raw body
    ///
    /// Used when the status element cannot be located structurally.
    pub fn from_markers(body: &str) -> Self {
        if body.contains("status>InProgress") {
            JobStatus::InProgress
        } else if body.contains("status>Pending") {
            JobStatus::Pending
        } else {
            JobStatus::Unknown(String::new())
        }
    }

    /// Whether polling should stop at this status
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::Pending | JobStatus::InProgress)
    }

    pub fn label(&self) -> &str {
        match self {
            JobStatus::Pending => "Pending",
            JobStatus::InProgress => "InProgress",
            JobStatus::Succeeded => "Succeeded",
            JobStatus::Failed => "Failed",
            JobStatus::Unknown(label) => label,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Unknown(label) if label.is_empty() => f.write_str("<unrecognised>"),
            other => f.write_str(other.label()),
        }
    }
}

//! Probe outcomes, the final application result and error definitions.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tri-state classification of a single probe call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// The service reported `"status": "success"`.
    Success,
    /// The service reported `"status": "retry"`.
    RetryRequested,
    /// Anything else: unexpected status, non-2xx, timeout, transport error.
    Failed,
}

impl ProbeOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeOutcome::Success => "success",
            ProbeOutcome::RetryRequested => "retry_requested",
            ProbeOutcome::Failed => "failed",
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall status of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Success,
    Failed,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Success => "success",
            ApplicationStatus::Failed => "failed",
        }
    }
}

/// Final result of one polling run.
///
/// `retry_count` is attached to every `Failed` result (0 when the first
/// attempt already failed) and never to a `Success` result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationResult {
    pub application_id: String,
    pub status: ApplicationStatus,
    pub description: String,
    /// When the attempt that produced this result began.
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_count: Option<u32>,
}

impl ApplicationResult {
    pub const BOTH_SUCCESSFUL: &'static str = "Both services are successful";
    pub const RETRY_LIMIT_REACHED: &'static str = "Retry limit reached";
    pub const SERVICES_FAILED: &'static str = "One or both services are failed";

    pub fn succeeded(application_id: &str, started_at: DateTime<Utc>) -> Self {
        Self {
            application_id: application_id.to_string(),
            status: ApplicationStatus::Success,
            description: Self::BOTH_SUCCESSFUL.to_string(),
            started_at,
            retry_count: None,
        }
    }

    pub fn failed(
        application_id: &str,
        description: &str,
        started_at: DateTime<Utc>,
        retry_count: u32,
    ) -> Self {
        Self {
            application_id: application_id.to_string(),
            status: ApplicationStatus::Failed,
            description: description.to_string(),
            started_at,
            retry_count: Some(retry_count),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ApplicationStatus::Success
    }
}

impl fmt::Display for ApplicationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "application {}: {} ({})",
            self.application_id,
            self.status.as_str(),
            self.description
        )?;
        if let Some(retries) = self.retry_count {
            write!(f, " after {} retries", retries)?;
        }
        Ok(())
    }
}

/// Cause of a `Failed` probe. Logged, never propagated past the probe.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Unexpected status code: {0}")]
    UnexpectedStatusCode(u16),

    #[error("Unexpected status: {0}")]
    UnexpectedStatus(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid status URL: {0}")]
    InvalidUrl(String),

    #[error("Probe misconfigured: {0}")]
    Misconfigured(String),
}

/// The run was cancelled externally. Never converted into a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Operation was cancelled")]
pub struct Cancelled;

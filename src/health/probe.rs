//! Status probing of one remote service.
//!
//! # Responsibilities
//! - Issue `GET <base_url>/status/<identifier>` within a fixed deadline
//! - Classify the reply into a [`ProbeOutcome`]
//! - Log the cause of every failed probe
//!
//! # Design Decisions
//! - One parameterized probe type, instantiated once per service
//! - Non-2xx, unexpected status values, timeouts and transport errors all
//!   collapse into `Failed`; only the log line tells them apart
//! - Cancellation is never classified; it aborts the probe with `Err(Cancelled)`
//! - No retries here; the retry driver owns the retry loop

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::config::{ProbeConfig, ServiceConfig};
use crate::health::types::{Cancelled, ProbeError, ProbeOutcome};
use crate::lifecycle::CancelToken;
use crate::observability::metrics;
use crate::resilience::timeouts::with_timeout;

/// Body returned by a status service.
#[derive(Debug, Deserialize)]
struct StatusBody {
    status: String,
}

/// A bounded-time status check against one remote service.
#[derive(Debug, Clone)]
pub struct StatusProbe {
    service_name: String,
    base_url: Url,
    timeout: Duration,
    client: reqwest::Client,
}

impl StatusProbe {
    pub fn new(service_name: &str, base_url: Url, timeout: Duration, client: reqwest::Client) -> Self {
        Self {
            service_name: service_name.to_string(),
            base_url,
            timeout,
            client,
        }
    }

    /// Build a probe from validated service and probe config.
    pub fn from_config(
        service: &ServiceConfig,
        probe: &ProbeConfig,
        client: reqwest::Client,
    ) -> Result<Self, ProbeError> {
        let base_url = Url::parse(&service.base_url)
            .map_err(|e| ProbeError::InvalidUrl(format!("{}: {}", service.base_url, e)))?;
        Ok(Self::new(&service.name, base_url, probe.timeout(), client))
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// URL of the status resource for `identifier`.
    pub fn status_url(&self, identifier: &str) -> Result<Url, ProbeError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProbeError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("status")
            .push(identifier);
        Ok(url)
    }

    /// Probe the service for `identifier`.
    ///
    /// Returns `Err(Cancelled)` only when `cancel` fires first; every other
    /// problem is folded into [`ProbeOutcome::Failed`].
    pub async fn probe(&self, identifier: &str, cancel: &CancelToken) -> Result<ProbeOutcome, Cancelled> {
        cancel.check()?;

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Cancelled),
            result = with_timeout(self.timeout, self.fetch(identifier)) => result,
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                match e {
                    ProbeError::Timeout(_) => tracing::warn!(
                        service = %self.service_name,
                        identifier,
                        error = %e,
                        "Status probe failed: timeout"
                    ),
                    _ => tracing::warn!(
                        service = %self.service_name,
                        identifier,
                        error = %e,
                        "Status probe failed"
                    ),
                }
                ProbeOutcome::Failed
            }
        };

        tracing::debug!(service = %self.service_name, %outcome, "Status probe finished");
        metrics::record_probe_outcome(&self.service_name, outcome);
        Ok(outcome)
    }

    async fn fetch(&self, identifier: &str) -> Result<ProbeOutcome, ProbeError> {
        let url = self.status_url(identifier)?;
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::UnexpectedStatusCode(status.as_u16()));
        }

        let body: StatusBody = response.json().await?;
        classify(&body.status)
    }
}

/// Map a declared status value to an outcome.
fn classify(status: &str) -> Result<ProbeOutcome, ProbeError> {
    match status {
        "success" => Ok(ProbeOutcome::Success),
        "retry" => Ok(ProbeOutcome::RetryRequested),
        other => Err(ProbeError::UnexpectedStatus(other.to_string())),
    }
}

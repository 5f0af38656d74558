//! Concurrent probing of both status services.

use async_trait::async_trait;

use crate::config::{AppConfig, ServiceConfig};
use crate::health::probe::StatusProbe;
use crate::health::types::{Cancelled, ProbeError, ProbeOutcome};
use crate::lifecycle::CancelToken;

/// One attempt: both services probed for the same identifier.
#[async_trait]
pub trait StatusCheck: Send + Sync {
    async fn check(
        &self,
        identifier: &str,
        cancel: &CancelToken,
    ) -> Result<(ProbeOutcome, ProbeOutcome), Cancelled>;
}

/// Runs both probes concurrently and waits for both outcomes.
#[derive(Debug, Clone)]
pub struct DualProbeCoordinator {
    first: StatusProbe,
    second: StatusProbe,
}

impl DualProbeCoordinator {
    pub fn new(first: StatusProbe, second: StatusProbe) -> Self {
        Self { first, second }
    }

    /// Build both probes from config, sharing one HTTP client.
    pub fn from_config(config: &AppConfig, client: reqwest::Client) -> Result<Self, ProbeError> {
        let (first, second) = match config.services.as_slice() {
            [first, second] => (first, second),
            other => {
                return Err(ProbeError::Misconfigured(format!(
                    "expected 2 services, found {}",
                    other.len()
                )))
            }
        };
        let build = |service: &ServiceConfig| {
            StatusProbe::from_config(service, &config.probe, client.clone())
        };
        Ok(Self::new(build(first)?, build(second)?))
    }

    pub fn probes(&self) -> (&StatusProbe, &StatusProbe) {
        (&self.first, &self.second)
    }
}

#[async_trait]
impl StatusCheck for DualProbeCoordinator {
    async fn check(
        &self,
        identifier: &str,
        cancel: &CancelToken,
    ) -> Result<(ProbeOutcome, ProbeOutcome), Cancelled> {
        // try_join drops the other probe as soon as one reports cancellation.
        let (first, second) = tokio::try_join!(
            self.first.probe(identifier, cancel),
            self.second.probe(identifier, cancel),
        )?;

        tracing::debug!(
            first_service = self.first.service_name(),
            %first,
            second_service = self.second.service_name(),
            %second,
            "Both status probes completed"
        );
        Ok((first, second))
    }
}

//! Retry driver.
//!
//! # Responsibilities
//! - Run dual-probe attempts until a terminal verdict
//! - Wait a fixed delay between attempts
//! - Enforce the retry budget
//!
//! # State Transitions
//! ```text
//! Attempting → Succeeded:     both probes Success
//! Attempting → RetryPending:  any probe RetryRequested (and not both Success)
//! Attempting → Failed:        otherwise ("One or both services are failed")
//! RetryPending → Attempting:  after the delay, while retries < budget
//! RetryPending → Failed:      after the delay, once retries == budget
//!                             ("Retry limit reached")
//! ```
//!
//! # Design Decisions
//! - Explicit loop with a local counter, no recursion
//! - Delay is fixed, never exponential
//! - Cancellation aborts the current attempt or delay and is returned as
//!   `Err(Cancelled)`, never as a `Failed` result

use chrono::Utc;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::RetryConfig;
use crate::health::coordinator::StatusCheck;
use crate::health::types::{ApplicationResult, Cancelled, ProbeOutcome};
use crate::lifecycle::CancelToken;
use crate::observability::metrics;
use crate::resilience::backoff::FixedDelay;

/// Decision taken from one attempt's pair of outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Succeeded,
    Retry,
    Failed,
}

/// Combine both outcomes. Order-independent.
pub fn evaluate(outcomes: (ProbeOutcome, ProbeOutcome)) -> Verdict {
    match outcomes {
        (ProbeOutcome::Success, ProbeOutcome::Success) => Verdict::Succeeded,
        (ProbeOutcome::RetryRequested, _) | (_, ProbeOutcome::RetryRequested) => Verdict::Retry,
        _ => Verdict::Failed,
    }
}

/// Drives a [`StatusCheck`] through the bounded retry loop.
pub struct RetryDriver<C> {
    check: C,
    max_retries: u32,
    delay: FixedDelay,
}

impl<C: StatusCheck> RetryDriver<C> {
    pub fn new(check: C, config: &RetryConfig) -> Self {
        Self {
            check,
            max_retries: config.max_retries,
            delay: FixedDelay::new(config.delay()),
        }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Poll both services for `application_id` until a final result.
    pub async fn run(
        &self,
        application_id: &str,
        cancel: &CancelToken,
    ) -> Result<ApplicationResult, Cancelled> {
        let span = tracing::info_span!(
            "status_check",
            operation_id = %Uuid::new_v4(),
            application_id
        );

        let result = self.run_attempts(application_id, cancel).instrument(span).await;
        match &result {
            Ok(result) => metrics::record_result(result.status),
            Err(_) => tracing::warn!(application_id, "Status check cancelled"),
        }
        result
    }

    async fn run_attempts(
        &self,
        application_id: &str,
        cancel: &CancelToken,
    ) -> Result<ApplicationResult, Cancelled> {
        let mut retries = 0u32;

        loop {
            let started_at = Utc::now();
            metrics::record_attempt();
            tracing::debug!(attempt = retries + 1, "Attempting status check");

            let outcomes = self.check.check(application_id, cancel).await?;

            match evaluate(outcomes) {
                Verdict::Succeeded => {
                    tracing::info!(retries, "Both services are successful");
                    return Ok(ApplicationResult::succeeded(application_id, started_at));
                }
                Verdict::Failed => {
                    tracing::info!(
                        retries,
                        first = %outcomes.0,
                        second = %outcomes.1,
                        "One or both services are failed"
                    );
                    return Ok(ApplicationResult::failed(
                        application_id,
                        ApplicationResult::SERVICES_FAILED,
                        started_at,
                        retries,
                    ));
                }
                Verdict::Retry => {
                    tracing::info!(
                        retry = retries + 1,
                        delay_ms = self.delay.delay_for(retries + 1).as_millis() as u64,
                        "Service requested retry, waiting"
                    );
                    self.delay.wait(retries + 1, cancel).await?;
                    retries += 1;

                    if retries >= self.max_retries {
                        tracing::warn!(retries, "Retry limit reached");
                        return Ok(ApplicationResult::failed(
                            application_id,
                            ApplicationResult::RETRY_LIMIT_REACHED,
                            started_at,
                            retries,
                        ));
                    }
                }
            }
        }
    }
}

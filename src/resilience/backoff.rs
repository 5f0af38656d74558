//! Fixed-delay retry pacing.

use std::time::Duration;

use tokio::time;

use crate::health::types::Cancelled;
use crate::lifecycle::CancelToken;

/// Constant delay between attempts. The delay never grows with the attempt
/// number and carries no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Delay before the given retry (1-based). Same value for every retry.
    pub fn delay_for(&self, _retry: u32) -> Duration {
        self.delay
    }

    /// Sleep before `retry`, returning early with [`Cancelled`] if `cancel` fires.
    pub async fn wait(&self, retry: u32, cancel: &CancelToken) -> Result<(), Cancelled> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Cancelled),
            _ = time::sleep(self.delay_for(retry)) => Ok(()),
        }
    }
}

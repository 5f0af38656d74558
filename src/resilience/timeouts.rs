//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap remote status calls with a deadline
//! - Cancel the wrapped operation cleanly on timeout
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from other errors in logs, but callers
//!   classify them like any other probe failure

use std::future::Future;
use std::time::Duration;

use tokio::time;

use crate::health::types::ProbeError;

/// Run `fut` with a deadline, mapping an elapsed deadline to [`ProbeError::Timeout`].
pub async fn with_timeout<T, F>(duration: Duration, fut: F) -> Result<T, ProbeError>
where
    F: Future<Output = Result<T, ProbeError>>,
{
    match time::timeout(duration, fut).await {
        Ok(result) => result,
        Err(_) => Err(ProbeError::Timeout(duration)),
    }
}

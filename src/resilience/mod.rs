//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Status probe:
//!     → timeouts.rs (15s deadline on request + body)
//! Attempt verdict:
//!     → retries.rs (succeed, fail, or retry the whole pair)
//!     → backoff.rs (fixed delay before the next attempt)
//! ```
//!
//! # Design Decisions
//! - Every remote call has a deadline
//! - Retries are driven by the services' explicit "retry" status only
//! - Retry budget is small and fixed

pub mod backoff;
pub mod retries;
pub mod timeouts;

pub use retries::{evaluate, RetryDriver, Verdict};

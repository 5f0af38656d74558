//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! probe / coordinator / retry driver produce:
//!     → logging.rs (structured log events, one diagnostic per failed probe)
//!     → metrics.rs (outcome and result counters)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON optional) for machine parsing
//! - Each run carries an operation id on its span
//! - Logs go to stderr so stdout carries only the result

pub mod logging;
pub mod metrics;

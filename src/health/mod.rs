//! Status checking subsystem.
//!
//! # Data Flow
//! ```text
//! RetryDriver (resilience/retries.rs)
//!     → DualProbeCoordinator::check (coordinator.rs)
//!         → StatusProbe::probe for service 1 ┐ concurrently,
//!         → StatusProbe::probe for service 2 ┘ joined
//!     ← (ProbeOutcome, ProbeOutcome)
//! ```
//!
//! # Design Decisions
//! - Probe errors are absorbed into `ProbeOutcome::Failed`
//! - Only `Cancelled` crosses layers
//! - Probes share one HTTP client but no mutable state

pub mod coordinator;
pub mod probe;
pub mod types;

pub use coordinator::{DualProbeCoordinator, StatusCheck};
pub use probe::StatusProbe;
pub use types::{ApplicationResult, ApplicationStatus, Cancelled, ProbeError, ProbeOutcome};

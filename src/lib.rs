//! Application status poller library.
//!
//! Polls two status services for one application id, combines their
//! answers and retries the pair with a fixed delay while either service
//! asks for it.

pub mod config;
pub mod health;
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::AppConfig;
pub use health::{ApplicationResult, ApplicationStatus, DualProbeCoordinator, StatusProbe};
pub use lifecycle::Shutdown;
pub use resilience::RetryDriver;

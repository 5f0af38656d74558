//! Metrics collection.
//!
//! # Metrics
//! - `status_probe_outcomes_total` (counter): probe outcomes by service, outcome
//! - `status_check_attempts_total` (counter): dual-probe attempts
//! - `status_check_results_total` (counter): final results by status
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade only; the embedding process
//!   chooses a recorder, and without one every call is a no-op
//! - Recording can be switched off from config

use std::sync::atomic::{AtomicBool, Ordering};

use crate::health::types::{ApplicationStatus, ProbeOutcome};

static ENABLED: AtomicBool = AtomicBool::new(true);

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

fn enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

pub fn record_probe_outcome(service: &str, outcome: ProbeOutcome) {
    if !enabled() {
        return;
    }
    metrics::counter!(
        "status_probe_outcomes_total",
        "service" => service.to_string(),
        "outcome" => outcome.as_str()
    )
    .increment(1);
}

pub fn record_attempt() {
    if !enabled() {
        return;
    }
    metrics::counter!("status_check_attempts_total").increment(1);
}

pub fn record_result(status: ApplicationStatus) {
    if !enabled() {
        return;
    }
    metrics::counter!("status_check_results_total", "status" => status.as_str()).increment(1);
}

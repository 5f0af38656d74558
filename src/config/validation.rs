//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, retry budget > 0)
//! - Check that both service URLs can carry a `/status/<id>` path
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;

use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;

/// Number of services combined on each attempt.
pub const SERVICE_COUNT: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("application_id must not be empty")]
    EmptyApplicationId,

    #[error("expected exactly 2 services, found {0}")]
    ServiceCount(usize),

    #[error("service #{0} has an empty name")]
    EmptyServiceName(usize),

    #[error("duplicate service name '{0}'")]
    DuplicateServiceName(String),

    #[error("service '{name}' has invalid base_url '{url}': {reason}")]
    InvalidBaseUrl {
        name: String,
        url: String,
        reason: String,
    },

    #[error("probe.timeout_secs must be greater than zero")]
    ZeroProbeTimeout,

    #[error("retries.max_retries must be greater than zero")]
    ZeroRetryBudget,
}

pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.application_id.trim().is_empty() {
        errors.push(ValidationError::EmptyApplicationId);
    }

    if config.services.len() != SERVICE_COUNT {
        errors.push(ValidationError::ServiceCount(config.services.len()));
    }

    let mut seen = HashSet::new();
    for (index, service) in config.services.iter().enumerate() {
        if service.name.trim().is_empty() {
            errors.push(ValidationError::EmptyServiceName(index));
        } else if !seen.insert(service.name.as_str()) {
            errors.push(ValidationError::DuplicateServiceName(service.name.clone()));
        }

        if let Err(reason) = check_base_url(&service.base_url) {
            errors.push(ValidationError::InvalidBaseUrl {
                name: service.name.clone(),
                url: service.base_url.clone(),
                reason,
            });
        }
    }

    if config.probe.timeout_secs == 0 {
        errors.push(ValidationError::ZeroProbeTimeout);
    }

    if config.retries.max_retries == 0 {
        errors.push(ValidationError::ZeroRetryBudget);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_base_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme '{}'", other)),
    }
    if url.cannot_be_a_base() {
        return Err("url cannot be a base".to_string());
    }
    Ok(())
}

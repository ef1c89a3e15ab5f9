//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (durations > 0, bind address parses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ConfigViolation>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ConfigViolation {
    pub field: &'static str,
    pub message: String,
}

impl ConfigViolation {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check every semantic rule and collect all violations.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ConfigViolation>> {
    let mut violations = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        violations.push(ConfigViolation::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    let stress = &config.stress;
    if stress.max_duration_secs == 0 {
        violations.push(ConfigViolation::new(
            "stress.max_duration_secs",
            "must be at least 1",
        ));
    }
    if stress.default_duration_secs == 0 || stress.default_duration_secs > stress.max_duration_secs {
        violations.push(ConfigViolation::new(
            "stress.default_duration_secs",
            format!("must be between 1 and {}", stress.max_duration_secs),
        ));
    }
    if stress.cores == Some(0) {
        violations.push(ConfigViolation::new("stress.cores", "must be at least 1"));
    }

    let observability = &config.observability;
    if observability.metrics_upkeep_secs == 0 {
        violations.push(ConfigViolation::new(
            "observability.metrics_upkeep_secs",
            "must be at least 1",
        ));
    }
    for path in &observability.quiet_paths {
        if !path.starts_with('/') {
            violations.push(ConfigViolation::new(
                "observability.quiet_paths",
                format!("'{}' must start with '/'", path),
            ));
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

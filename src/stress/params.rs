//! Stress query parameters.
//!
//! # Rules
//! - Missing, empty or unparseable values fall back to the defaults silently
//! - After parsing, values below 1 are rejected with a field-specific message
//!   (duration is checked before workers)
//! - Values above the ceiling are clamped, never rejected

use std::time::Duration;

use crate::config::StressConfig;
use crate::error::ValidationError;
use crate::stress::duration::{parse_go_duration, NANOS_PER_SEC};

/// Bounds applied to every stress request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StressLimits {
    pub default_duration_secs: u64,
    pub max_duration_secs: u64,
    /// Cores available to the process; the default worker count.
    pub cores: usize,
}

impl StressLimits {
    pub fn from_config(config: &StressConfig) -> Self {
        Self {
            default_duration_secs: config.default_duration_secs,
            max_duration_secs: config.max_duration_secs,
            cores: config.cores.unwrap_or_else(num_cpus::get).max(1),
        }
    }

    pub fn max_workers(&self) -> usize {
        self.cores.saturating_mul(2)
    }
}

impl Default for StressLimits {
    fn default() -> Self {
        Self::from_config(&StressConfig::default())
    }
}

/// Validated, clamped parameters for one stress run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StressParameters {
    duration_secs: u64,
    workers: usize,
}

impl StressParameters {
    /// Build parameters from a raw query string such as `duration=5s&workers=2`.
    ///
    /// The first occurrence of each key wins.
    pub fn from_query(query: Option<&str>, limits: &StressLimits) -> Result<Self, ValidationError> {
        let mut duration = None;
        let mut workers = None;
        for (key, value) in url::form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
            match key.as_ref() {
                "duration" if duration.is_none() => duration = Some(value.into_owned()),
                "workers" if workers.is_none() => workers = Some(value.into_owned()),
                _ => {}
            }
        }
        Self::parse(duration.as_deref(), workers.as_deref(), limits)
    }

    pub fn parse(
        duration: Option<&str>,
        workers: Option<&str>,
        limits: &StressLimits,
    ) -> Result<Self, ValidationError> {
        let duration_secs = duration
            .filter(|raw| !raw.is_empty())
            .and_then(parse_go_duration)
            .map(|nanos| nanos / NANOS_PER_SEC)
            .unwrap_or(limits.default_duration_secs as i64);

        let workers = workers
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| raw.parse::<i64>().ok())
            .unwrap_or(limits.cores as i64);

        if duration_secs < 1 {
            return Err(ValidationError::duration(limits.max_duration_secs));
        }
        if workers < 1 {
            return Err(ValidationError::workers(limits.max_workers()));
        }

        Ok(Self {
            duration_secs: (duration_secs as u64).min(limits.max_duration_secs),
            workers: (workers as u64).min(limits.max_workers() as u64) as usize,
        })
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

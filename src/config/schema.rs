//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files and
//! default every field, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,

    /// Bounds for the CPU stress endpoint.
    pub stress: StressConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable output for local development.
    Pretty,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error). Unknown values mean info.
    pub log_level: String,

    pub log_format: LogFormat,

    /// Paths whose successful completions are logged at debug instead of info.
    pub quiet_paths: Vec<String>,

    /// Interval between metrics recorder upkeep runs, in seconds.
    pub metrics_upkeep_secs: u64,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Json,
            quiet_paths: vec!["/health".to_string()],
            metrics_upkeep_secs: 5,
        }
    }
}

/// Stress endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StressConfig {
    /// Duration used when the request does not carry a usable one.
    pub default_duration_secs: u64,

    /// Longer requests are clamped to this.
    pub max_duration_secs: u64,

    /// Core count override. Detected from the host when unset.
    pub cores: Option<usize>,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            default_duration_secs: 2,
            max_duration_secs: 30,
            cores: None,
        }
    }
}

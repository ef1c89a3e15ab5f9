//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber exactly once, from `main`
//! - Map `LOG_LEVEL` style names onto tracing levels
//!
//! # Design Decisions
//! - JSON lines by default, pretty format for local development
//! - `RUST_LOG`, when set, takes precedence over the configured level
//! - A second initialization is an error, never a silent re-init

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
    util::TryInitError, EnvFilter,
};

use crate::config::{LogFormat, ObservabilityConfig};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Map a level name to a tracing level. Unknown names mean info.
pub fn parse_log_level(raw: &str) -> Level {
    match raw.trim().to_ascii_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Install the global subscriber.
pub fn init_logging(config: &ObservabilityConfig) -> Result<(), LoggingError> {
    let level = parse_log_level(&config.log_level);
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let json = config.log_format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json().flatten_event(true)))
        .with((!json).then(|| fmt::layer()))
        .try_init()?;

    Ok(())
}

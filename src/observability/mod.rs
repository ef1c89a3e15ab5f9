//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request pipeline and handlers produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (JSON lines for log aggregation)
//!     → GET /metrics (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Telemetry is constructed once and injected, never a global singleton
//! - Metrics are cheap (atomic increments inside the recorder)

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, parse_log_level, LoggingError};
pub use metrics::{spawn_upkeep, Telemetry};

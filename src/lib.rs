//! Resilient GitOps Platform service library.
//!
//! A small instrumented HTTP service whose `/stress` endpoint saturates CPU
//! cores on demand, to exercise autoscaling in the host orchestrator.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod stress;

pub use config::AppConfig;
pub use error::{AppError, ValidationError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use observability::Telemetry;

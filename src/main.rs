//! Resilient GitOps Platform (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ─────────────▶ recovery ─▶ request id ─▶ observe ─▶ handler
//!                                                │           │
//!                                                ▼           ▼ (/stress)
//!                                           Telemetry   load generator
//!                                         (logs, /metrics)  (blocking pool)
//! ```
//!
//! # Startup Order
//! 1. `.env`, CLI flags and environment, optional TOML file
//! 2. Logging
//! 3. Telemetry, shutdown coordinator, signal handler, metrics upkeep
//! 4. Bind listener and serve until SIGINT/SIGTERM

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;

use resilient_gitops::config::CliArgs;
use resilient_gitops::lifecycle::{spawn_signal_handler, Shutdown};
use resilient_gitops::observability::{init_logging, spawn_upkeep};
use resilient_gitops::{AppConfig, HttpServer, Telemetry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let args = CliArgs::parse();
    let config = AppConfig::resolve(&args)?;

    init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        log_level = %config.observability.log_level,
        max_stress_secs = config.stress.max_duration_secs,
        "Configuration loaded"
    );

    let telemetry = Arc::new(Telemetry::new()?);

    // Subscribe every task before signals can fire.
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let upkeep = spawn_upkeep(
        telemetry.clone(),
        Duration::from_secs(config.observability.metrics_upkeep_secs),
        shutdown.subscribe(),
    );
    spawn_signal_handler(shutdown.clone());

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(
        address = %local_addr,
        "Starting Resilient GitOps Platform"
    );

    let server = HttpServer::new(config, telemetry);
    server.run(listener, server_shutdown).await?;

    shutdown.trigger();
    let _ = upkeep.await;

    tracing::info!("Shutdown complete");
    Ok(())
}

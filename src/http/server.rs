//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up the request pipeline (recovery, request ID, observation)
//! - Bind server to listener
//! - Stop accepting and drain on shutdown

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::http::handlers;
use crate::http::middleware::Pipeline;
use crate::lifecycle::ShutdownSignal;
use crate::observability::Telemetry;
use crate::stress::StressLimits;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub telemetry: Arc<Telemetry>,
    pub stress: StressLimits,
}

/// HTTP server for the platform service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig, telemetry: Arc<Telemetry>) -> Self {
        let state = AppState {
            telemetry: telemetry.clone(),
            stress: StressLimits::from_config(&config.stress),
        };
        let pipeline = Pipeline::new(telemetry, config.observability.quiet_paths.clone());

        let router = Self::build_router(state, pipeline);
        Self { router }
    }

    /// Build the Axum router with the pipeline around every route.
    fn build_router(state: AppState, pipeline: Pipeline) -> Router {
        let routes = Router::new()
            .route("/", get(handlers::home))
            .route("/health", get(handlers::health))
            .route("/stress", get(handlers::stress))
            .route("/metrics", get(handlers::metrics))
            .fallback(handlers::not_found)
            .with_state(state);

        tracing::info!(route_count = 4, "Router configured successfully");

        pipeline.wrap(routes)
    }

    /// The fully layered router, for driving requests in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until a shutdown signal arrives, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

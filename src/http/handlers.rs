//! Route handlers.
//!
//! # Endpoints
//! - `GET /`: welcome envelope with the service version
//! - `GET /health`: plain `OK` for liveness and readiness probes
//! - `GET /stress`: saturate CPU cores for a bounded time
//! - `GET /metrics`: Prometheus text exposition

use std::time::Instant;

use axum::{
    extract::{MatchedPath, RawQuery, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;
use crate::http::response::{send_json, Envelope};
use crate::http::server::AppState;
use crate::observability::metrics::EXPOSITION_CONTENT_TYPE;
use crate::stress::{format_go_duration, run_burst, StressParameters};

pub const APP_VERSION: &str = "v1.0.0";
pub const WELCOME_MESSAGE: &str = "Welcome to the Resilient GitOps Platform!";

/// Body of a finished stress run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StressReport {
    pub status: &'static str,
    pub message: &'static str,
    /// Wall-clock time of the whole burst in Go duration notation.
    pub duration: String,
    pub workers: usize,
}

pub async fn home(State(state): State<AppState>, method: Method, path: MatchedPath) -> Response {
    state.telemetry.track_request(path.as_str(), method.as_str());

    tracing::debug!(path = %path.as_str(), method = %method, "Processing home request");

    send_json(
        StatusCode::OK,
        &Envelope::new("success", WELCOME_MESSAGE, APP_VERSION),
    )
}

/// Liveness probe. Not counted in `http_requests_total`.
pub async fn health(path: MatchedPath) -> impl IntoResponse {
    tracing::debug!(path = %path.as_str(), "Health check requested");
    (StatusCode::OK, "OK")
}

/// Run a CPU burst and report how long it took.
///
/// The response is only written once every worker has finished.
pub async fn stress(
    State(state): State<AppState>,
    method: Method,
    path: MatchedPath,
    RawQuery(query): RawQuery,
) -> Result<Response, AppError> {
    state.telemetry.track_request(path.as_str(), method.as_str());

    let params = StressParameters::from_query(query.as_deref(), &state.stress).map_err(|err| {
        tracing::warn!(
            error = %err,
            field = %err.field,
            path = %path.as_str(),
            "Invalid stress request parameters"
        );
        err
    })?;

    tracing::warn!(
        path = %path.as_str(),
        duration_secs = params.duration_secs(),
        workers = params.workers(),
        "Multi-core stress test initiated - CPU spike incoming"
    );

    let start = Instant::now();
    run_burst(params.duration(), params.workers()).await;
    let elapsed = start.elapsed();

    tracing::info!(
        duration = %format_go_duration(elapsed),
        workers = params.workers(),
        "Stress test completed"
    );

    let report = StressReport {
        status: "stress_complete",
        message: "CPU load simulation finished",
        duration: format_go_duration(elapsed),
        workers: params.workers(),
    };
    Ok(send_json(StatusCode::OK, &report))
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)],
        state.telemetry.render(),
    )
}

/// Fallback for paths no route matches.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404 page not found\n")
}

//! Request timing, metrics and access logging.

use std::net::SocketAddr;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, MatchedPath, State},
    http::{header, Method, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use futures_util::FutureExt;
use tracing::Level;

use crate::http::middleware::Pipeline;
use crate::http::request::RequestIdExt;
use crate::http::response;

/// Metric label for requests that matched no route.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// What happened to one request, as reported to the log.
#[derive(Debug, Clone)]
pub struct RequestOutcome {
    pub method: Method,
    pub path: String,
    pub status: StatusCode,
    pub elapsed: Duration,
    pub remote_addr: String,
    pub user_agent: String,
    pub request_id: String,
}

impl RequestOutcome {
    /// Level for the completion event: 4xx warn, 5xx and above error, the rest info.
    pub fn level(&self) -> Level {
        level_for_status(self.status)
    }

    /// Emit the single completion event for this request.
    pub fn emit(&self, level: Level) {
        macro_rules! completed {
            ($level:expr, $outcome:expr) => {
                tracing::event!(
                    $level,
                    method = %$outcome.method,
                    path = %$outcome.path,
                    status = $outcome.status.as_u16(),
                    duration_secs = $outcome.elapsed.as_secs_f64(),
                    remote_addr = %$outcome.remote_addr,
                    user_agent = %$outcome.user_agent,
                    request_id = %$outcome.request_id,
                    "HTTP request completed"
                )
            };
        }

        match level {
            Level::ERROR => completed!(Level::ERROR, self),
            Level::WARN => completed!(Level::WARN, self),
            Level::INFO => completed!(Level::INFO, self),
            Level::DEBUG => completed!(Level::DEBUG, self),
            _ => completed!(Level::TRACE, self),
        }
    }
}

pub fn level_for_status(status: StatusCode) -> Level {
    match status.as_u16() {
        400..=499 => Level::WARN,
        500.. => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Time the inner handler, observe its latency and log its outcome.
///
/// The inner chain runs on its own task. If the client goes away and this
/// future is dropped, the task is detached rather than aborted, so the
/// request is still observed and logged once it finishes.
///
/// The latency is observed even when the handler panics; the panic is then
/// resumed here so the recovery stage writes the one log event for the
/// request.
pub async fn observe(
    State(pipeline): State<Pipeline>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or(UNMATCHED_ROUTE, MatchedPath::as_str)
        .to_owned();
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_default();
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    let request_id = request.request_id().unwrap_or_default().to_owned();

    let handler = tokio::spawn(async move {
        let start = Instant::now();
        let result = AssertUnwindSafe(next.run(request)).catch_unwind().await;
        let elapsed = start.elapsed();
        pipeline
            .telemetry()
            .observe_duration(&route, method.as_str(), elapsed.as_secs_f64());

        let response = match result {
            Ok(response) => response,
            Err(payload) => panic::resume_unwind(payload),
        };

        let outcome = RequestOutcome {
            method,
            path,
            status: response.status(),
            elapsed,
            remote_addr,
            user_agent,
            request_id,
        };
        let level = match outcome.level() {
            Level::INFO if pipeline.is_quiet(&outcome.path) => Level::DEBUG,
            level => level,
        };
        outcome.emit(level);

        response
    });

    match handler.await {
        Ok(response) => response,
        Err(err) if err.is_panic() => panic::resume_unwind(err.into_panic()),
        Err(err) => {
            tracing::error!(error = %err, "Request task did not complete");
            response::internal_error()
        }
    }
}

//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Own the Prometheus recorder for the process
//! - Count tracked requests and observe request latency
//! - Render the Prometheus text format for `/metrics`
//!
//! # Metrics
//! - `http_requests_total` (counter): requests by path, method
//! - `http_request_duration_seconds` (histogram): latency by path, method
//!
//! # Design Decisions
//! - The recorder is never installed globally; `Telemetry` is built once at
//!   startup and injected, and every update runs against it as a local
//!   recorder
//! - Histogram buckets are the Prometheus client defaults

use std::sync::Arc;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram, with_local_recorder};
use metrics_exporter_prometheus::{
    BuildError, Matcher, PrometheusBuilder, PrometheusHandle, PrometheusRecorder,
};
use tokio::task::JoinHandle;
use tokio::time;

use crate::lifecycle::ShutdownSignal;

pub const REQUESTS_TOTAL: &str = "http_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";

/// Prometheus client default buckets, in seconds.
pub const DEFAULT_BUCKETS: [f64; 11] = [
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Content type of the Prometheus text exposition format.
pub const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Process-wide telemetry sink for counters and histograms.
pub struct Telemetry {
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
}

impl Telemetry {
    pub fn new() -> Result<Self, BuildError> {
        let recorder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full(REQUEST_DURATION_SECONDS.to_string()),
                &DEFAULT_BUCKETS,
            )?
            .build_recorder();
        let handle = recorder.handle();

        let telemetry = Self { recorder, handle };
        telemetry.scoped(|| {
            describe_counter!(REQUESTS_TOTAL, "Total number of HTTP requests processed");
            describe_histogram!(
                REQUEST_DURATION_SECONDS,
                "Duration of HTTP requests in seconds"
            );
        });
        Ok(telemetry)
    }

    fn scoped<T>(&self, f: impl FnOnce() -> T) -> T {
        with_local_recorder(&self.recorder, f)
    }

    /// Increment the request counter for a path and method.
    pub fn track_request(&self, path: &str, method: &str) {
        let labels = [("path", path.to_owned()), ("method", method.to_owned())];
        self.scoped(|| counter!(REQUESTS_TOTAL, &labels).increment(1));
    }

    /// Record how long a request took.
    pub fn observe_duration(&self, path: &str, method: &str, seconds: f64) {
        let labels = [("path", path.to_owned()), ("method", method.to_owned())];
        self.scoped(|| histogram!(REQUEST_DURATION_SECONDS, &labels).record(seconds));
    }

    /// Render every metric in the Prometheus text format.
    pub fn render(&self) -> String {
        self.handle.render()
    }

    pub fn run_upkeep(&self) {
        self.handle.run_upkeep();
    }
}

/// Periodically run recorder upkeep until shutdown.
pub fn spawn_upkeep(
    telemetry: Arc<Telemetry>,
    every: Duration,
    mut shutdown: ShutdownSignal,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval(every);
        loop {
            tokio::select! {
                _ = ticker.tick() => telemetry.run_upkeep(),
                _ = shutdown.recv() => {
                    tracing::debug!("Metrics upkeep received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    })
}

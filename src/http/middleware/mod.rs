//! Request pipeline.
//!
//! # Data Flow
//! ```text
//! request
//!     → recovery.rs (unwind boundary, fixed 500 on panic)
//!     → request id (generate or keep x-request-id, echo it back)
//!     → observe.rs (latency histogram, one completion log event)
//!     → route handler
//! ```
//!
//! # Design Decisions
//! - Recovery is outermost so panics in any later stage are contained
//! - Observation is innermost so latency covers the handler only
//! - Every route and the fallback get the same stack
//! - The handler runs on its own task, so a dropped connection is still
//!   observed and logged when the handler finishes

pub mod observe;
pub mod recovery;

use std::sync::Arc;

use axum::{middleware, Router};
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};

use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::observability::Telemetry;

pub use observe::{level_for_status, RequestOutcome};
pub use recovery::recover;

/// Shared state of the request pipeline.
#[derive(Clone)]
pub struct Pipeline {
    telemetry: Arc<Telemetry>,
    quiet_paths: Arc<[String]>,
}

impl Pipeline {
    pub fn new(telemetry: Arc<Telemetry>, quiet_paths: Vec<String>) -> Self {
        Self {
            telemetry,
            quiet_paths: quiet_paths.into(),
        }
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    /// Whether successful completions on `path` are logged at debug.
    pub fn is_quiet(&self, path: &str) -> bool {
        self.quiet_paths.iter().any(|quiet| quiet == path)
    }

    /// Wrap every route of `router` in the pipeline.
    pub fn wrap(self, router: Router) -> Router {
        router.layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(recover))
                .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
                .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                .layer(middleware::from_fn_with_state(self, observe::observe)),
        )
    }
}

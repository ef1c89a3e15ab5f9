//! Panic recovery middleware.
//! Contains any panic raised further down the pipeline.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use futures_util::FutureExt;

use crate::http::response;

/// Run the rest of the pipeline inside an unwind boundary.
///
/// A panic is logged at error with its payload and turned into a fixed 500;
/// it never propagates further and never takes the process down.
pub async fn recover(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(payload) => {
            tracing::error!(
                panic = %panic_message(payload.as_ref()),
                method = %method,
                path = %path,
                "Recovered from panic"
            );
            response::internal_error()
        }
    }
}

/// Best-effort text of a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

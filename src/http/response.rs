//! Response envelopes and JSON encoding.
//!
//! # Responsibilities
//! - Define the status/message/version envelope every JSON endpoint returns
//! - Serialize values to JSON responses
//! - Provide fixed literal bodies for failures that must not serialize
//!
//! # Design Decisions
//! - Bodies end with a newline, matching a streaming JSON encoder
//! - Failure bodies are pre-serialized constants so writing them cannot fail

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;

pub const INTERNAL_ERROR_BODY: &str = "{\"status\":\"error\",\"message\":\"Internal server error\"}\n";
pub const ENCODING_ERROR_BODY: &str =
    "{\"status\":\"error\",\"message\":\"Failed to encode response\"}\n";

const APPLICATION_JSON: &str = "application/json";

/// Standard API response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
}

impl Envelope {
    pub fn new(status: impl Into<String>, message: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
            version: version.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new("error", message, "")
    }
}

/// Serialize `value` as the JSON body of a response with `status`.
///
/// Falls back to a fixed 500 body when serialization fails.
pub fn send_json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(mut body) => {
            body.push(b'\n');
            (status, [(header::CONTENT_TYPE, APPLICATION_JSON)], body).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to encode response");
            AppError::Encoding(err).into_response()
        }
    }
}

/// The 500 written when a response could not be serialized.
pub fn encoding_failure() -> Response {
    fixed_json(StatusCode::INTERNAL_SERVER_ERROR, ENCODING_ERROR_BODY)
}

/// The 500 written when a handler panicked.
pub fn internal_error() -> Response {
    fixed_json(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY)
}

fn fixed_json(status: StatusCode, body: &'static str) -> Response {
    (status, [(header::CONTENT_TYPE, APPLICATION_JSON)], body).into_response()
}

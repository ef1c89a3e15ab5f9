//! Request-level error taxonomy.
//!
//! Validation failures are the client's fault and surface as 400 with a
//! field-specific message. Encoding failures surface as 500 with a fixed
//! literal body. Panics never reach this type: they stop at the recovery
//! middleware.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::http::response::{self, Envelope};

/// Query field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationField {
    Duration,
    Workers,
    Unknown,
}

impl std::fmt::Display for ValidationField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValidationField::Duration => "duration",
            ValidationField::Workers => "workers",
            ValidationField::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// A parsed query value fell outside its declared range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: ValidationField,
    pub message: String,
}

impl ValidationError {
    pub fn duration(max_secs: u64) -> Self {
        Self {
            field: ValidationField::Duration,
            message: format!("duration must be between 1s and {}s", max_secs),
        }
    }

    pub fn workers(max_workers: usize) -> Self {
        Self {
            field: ValidationField::Workers,
            message: format!("workers must be between 1 and {}", max_workers),
        }
    }
}

/// Errors a handler can return instead of a response.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to encode response: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(err) => {
                response::send_json(StatusCode::BAD_REQUEST, &Envelope::error(err.message))
            }
            AppError::Encoding(_) => response::encoding_failure(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::duration(30).to_string(),
            "duration must be between 1s and 30s"
        );
        assert_eq!(
            ValidationError::workers(8).to_string(),
            "workers must be between 1 and 8"
        );
        assert_eq!(ValidationError::workers(8).field.to_string(), "workers");
    }

    #[test]
    fn test_validation_error_is_bad_request() {
        let response = AppError::from(ValidationError::workers(4)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

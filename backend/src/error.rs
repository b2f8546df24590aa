//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! All errors implement `IntoResponse` to provide consistent error formatting.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Message returned whenever a course lookup misses
pub const COURSE_NOT_FOUND: &str = "Course not found";

/// Message returned when an enrollment carries no email
pub const EMAIL_REQUIRED: &str = "User email is required";

/// Application-level error types
///
/// Each variant implements automatic conversion to HTTP responses via `IntoResponse`.
/// The response body is always `{"message": <display text>}`.
#[derive(Error, Debug)]
pub enum AppError {
    /// A required request field was missing
    #[error("{0}")]
    InvalidRequest(String),

    /// No record matched the request
    #[error("{0}")]
    NotFound(String),

    /// Reading or writing the course file failed
    #[error("Persistence error: {0}")]
    Persistence(#[from] crate::state::PersistenceError),
}

impl AppError {
    /// The 404 every course lookup reports
    pub fn course_not_found() -> Self {
        AppError::NotFound(COURSE_NOT_FOUND.to_string())
    }

    /// HTTP status this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

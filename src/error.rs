//! Structured API errors.
//!
//! DESIGN
//! ======
//! Service modules own their `thiserror` enums. Each implements [`ErrorCode`]
//! so route handlers can turn any of them into the same JSON error body:
//! `{ "code": "E_...", "message": "...", "retryable": bool }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

/// Grepable error code and retryable flag for structured error responses.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

/// JSON error body paired with the HTTP status it is sent with.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub retryable: bool,
}

impl ApiError {
    /// Build an error response from a typed error.
    #[must_use]
    pub fn from_err(status: StatusCode, err: &(impl ErrorCode + ?Sized)) -> Self {
        Self { status, code: err.error_code(), message: err.to_string(), retryable: err.retryable() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

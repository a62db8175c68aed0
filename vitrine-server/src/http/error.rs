//! API error types with IntoResponse
//!
//! Two shapes only: a rejected request carries the catalog's message as a
//! JSON string, anything unexpected is a bare `error` text body.

use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::db::repos::ListFailure;

/// Body sent with every 500 response.
pub const INTERNAL_ERROR_BODY: &str = "error";

/// API error type with automatic HTTP status mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    /// Nothing was removed (400, catalog message)
    Rejected { message: &'static str },

    /// Store failure or handler panic (500, logged where it happened)
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Rejected { message } => (StatusCode::BAD_REQUEST, Json(message)).into_response(),
            Self::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
            }
        }
    }
}

impl From<ListFailure> for ApiError {
    fn from(_: ListFailure) -> Self {
        Self::Internal
    }
}

/// Response for a panic caught by `CatchPanicLayer`.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    tracing::error!(panic = detail, "request handler panicked");

    ApiError::Internal.into_response()
}

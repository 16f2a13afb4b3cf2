use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::errors::ServiceError;
use thiserror::Error;

/// One named reason an input was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// JSON body for client errors that carry details.
#[derive(Debug, Serialize)]
pub struct JsonApiError {
    pub error: &'static str,
    pub violations: Vec<Violation>,
}

/// Marker attached to 500 responses. The error boundary swaps the response for the
/// public `{error, traceId}` shape and logs `cause`, which never leaves the process.
#[derive(Debug, Clone)]
pub struct InternalFailure {
    pub cause: String,
}

impl IntoResponse for InternalFailure {
    fn into_response(self) -> Response {
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        res.extensions_mut().insert(self);
        res
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed ({} violations)", .0.len())]
    Validation(Vec<Violation>),
    #[error("path id does not match body productID")]
    IdMismatch,
    #[error("not found")]
    NotFound,
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(violations) => (
                StatusCode::BAD_REQUEST,
                Json(JsonApiError { error: "Validation Error", violations }),
            )
                .into_response(),
            ApiError::IdMismatch => StatusCode::BAD_REQUEST.into_response(),
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Internal(cause) => InternalFailure { cause }.into_response(),
        }
    }
}

//! Outermost failure handling.
//!
//! Anything below the transport that fails unexpectedly ends up here exactly once: either as
//! an [`ApiError::Internal`](crate::errors::ApiError) tagged response or as a caught panic.
//! The caller gets a generic 500 with the request's correlation id; the cause goes to the log.

use std::any::Any;

use axum::extract::Request;
use axum::http::{HeaderName, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;
use uuid::Uuid;

use crate::errors::InternalFailure;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

const GENERIC_ERROR: &str = "An unexpected error occurred.";

#[derive(Debug, Serialize)]
pub struct InternalErrorBody {
    pub error: &'static str,
    #[serde(rename = "traceId")]
    pub trace_id: String,
}

pub async fn error_boundary(req: Request, next: Next) -> Response {
    let trace_id = req
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let res = next.run(req).await;
    let cause = match res.extensions().get::<InternalFailure>() {
        Some(failure) => failure.cause.clone(),
        None => return res,
    };

    error!(%trace_id, %method, %path, %cause, "unhandled failure");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(InternalErrorBody { error: GENERIC_ERROR, trace_id }),
    )
        .into_response()
}

/// `CatchPanicLayer` hook: turn a panic payload into a tagged 500 for [`error_boundary`].
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let cause = if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panic: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panic: {s}")
    } else {
        "panic with non-string payload".to_string()
    };
    InternalFailure { cause }.into_response()
}

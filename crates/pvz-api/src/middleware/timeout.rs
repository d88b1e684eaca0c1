//! Per-request deadline.
//!
//! Every store and cache call made while handling a request runs inside
//! this deadline. When it elapses the handler future is dropped, which
//! rolls back any open transaction.

use std::time::Duration;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use pvz_core::error::AppError;

use crate::error::ApiError;

/// Runs the rest of the stack under `limit`; answers 504 when it elapses.
pub async fn request_deadline(
    State(limit): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(elapsed) => ApiError(AppError::from(elapsed)).into_response(),
    }
}

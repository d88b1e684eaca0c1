//! Request counting and latency middleware.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;

use pvz_core::metrics::Metrics;

/// Counts each request and observes its latency, labelled by method and
/// route template (`/pvz/{pvzId}/close_last_reception`, not the concrete id).
pub async fn record_metrics(
    State(metrics): State<Arc<Metrics>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().as_str().to_owned();
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    metrics.request_started(&method, &endpoint);
    let start = Instant::now();

    let response = next.run(request).await;

    metrics.request_finished(&method, &endpoint, start.elapsed().as_secs_f64());
    response
}

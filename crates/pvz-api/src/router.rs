//! Route definitions for the PVZ HTTP API.
//!
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let deadline = Duration::from_secs(state.config.server.request_timeout_seconds);
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);
    let metrics = Arc::clone(&state.metrics);

    Router::new()
        .merge(public_routes())
        .merge(point_routes())
        .merge(reception_routes())
        .merge(product_routes())
        .layer(axum_middleware::from_fn_with_state(
            deadline,
            middleware::timeout::request_deadline,
        ))
        .layer(axum_middleware::from_fn_with_state(
            metrics,
            middleware::metrics::record_metrics,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Liveness, metrics and session endpoints that need no token
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/ping", get(handlers::health::ping))
        .route("/health", get(handlers::health::health))
        .route("/metrics", get(handlers::health::metrics))
        .route("/dummyLogin", post(handlers::auth::dummy_login))
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
}

/// Point registry
fn point_routes() -> Router<AppState> {
    Router::new().route(
        "/pvz",
        post(handlers::point::create_point).get(handlers::point::list_points),
    )
}

/// Reception lifecycle
fn reception_routes() -> Router<AppState> {
    Router::new()
        .route("/receptions", post(handlers::reception::open_reception))
        .route(
            "/pvz/{pvzId}/close_last_reception",
            post(handlers::reception::close_last_reception),
        )
}

/// Product ledger
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", post(handlers::product::add_product))
        .route(
            "/pvz/{pvzId}/delete_last_product",
            post(handlers::product::delete_last_product),
        )
}

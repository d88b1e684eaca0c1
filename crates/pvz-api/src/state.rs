//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use pvz_auth::session::SessionStore;
use pvz_cache::CacheManager;
use pvz_core::config::AppConfig;
use pvz_core::metrics::Metrics;
use pvz_service::{PointService, ProductService, ReceptionService, SessionService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,

    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// Session cache (Redis or in-memory)
    pub cache: Arc<CacheManager>,
    /// Session token store
    pub sessions: Arc<SessionStore>,
    /// Prometheus counters and histograms
    pub metrics: Arc<Metrics>,

    /// Point registry
    pub point_service: Arc<PointService>,
    /// Reception lifecycle
    pub reception_service: Arc<ReceptionService>,
    /// Product ledger
    pub product_service: Arc<ProductService>,
    /// Login and logout
    pub session_service: Arc<SessionService>,
    /// Registration
    pub user_service: Arc<UserService>,
}

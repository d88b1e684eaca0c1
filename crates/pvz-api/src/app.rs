//! Application builder: wires services, router and middleware into an
//! Axum app and serves it.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::PgPool;
use tokio::sync::Notify;
use tracing::{error, info, warn};

use pvz_auth::password::PasswordHasher;
use pvz_auth::rbac::RbacEnforcer;
use pvz_auth::session::SessionStore;
use pvz_cache::CacheManager;
use pvz_core::config::AppConfig;
use pvz_core::error::AppError;
use pvz_core::metrics::Metrics;
use pvz_database::repositories::{
    PointRepository, ProductRepository, ReceptionRepository, UserRepository,
};
use pvz_service::{PointService, ProductService, ReceptionService, SessionService, UserService};

use crate::router::build_router;
use crate::state::AppState;

/// Builds repositories, auth components and services over `db_pool` and
/// `cache`.
pub fn build_state(
    config: AppConfig,
    db_pool: PgPool,
    cache: Arc<CacheManager>,
    metrics: Arc<Metrics>,
) -> AppState {
    let point_repo = Arc::new(PointRepository::new(db_pool.clone()));
    let reception_repo = Arc::new(ReceptionRepository::new(db_pool.clone()));
    let product_repo = Arc::new(ProductRepository::new(db_pool.clone()));
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));

    let rbac = Arc::new(RbacEnforcer::new());
    let hasher = Arc::new(PasswordHasher::new());
    let sessions = Arc::new(SessionStore::new(&config.auth, Arc::clone(&cache)));

    let point_service = Arc::new(PointService::new(
        point_repo,
        Arc::clone(&rbac),
        Arc::clone(&metrics),
    ));
    let reception_service = Arc::new(ReceptionService::new(
        Arc::clone(&reception_repo),
        Arc::clone(&rbac),
        Arc::clone(&metrics),
    ));
    let product_service = Arc::new(ProductService::new(
        reception_repo,
        product_repo,
        Arc::clone(&rbac),
        Arc::clone(&metrics),
    ));
    let session_service = Arc::new(SessionService::new(
        Arc::clone(&user_repo),
        Arc::clone(&sessions),
        Arc::clone(&hasher),
        rbac,
        config.auth.dummy_login_enabled,
    ));
    let user_service = Arc::new(UserService::new(
        user_repo,
        hasher,
        usize::try_from(config.auth.password_min_length).unwrap_or(usize::MAX),
    ));

    AppState {
        config: Arc::new(config),
        db_pool,
        cache,
        sessions,
        metrics,
        point_service,
        reception_service,
        product_service,
        session_service,
        user_service,
    }
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Serves the API until Ctrl-C or SIGTERM, then drains open connections
/// for at most `server.shutdown_grace_seconds`.
pub async fn run_server(
    config: AppConfig,
    db_pool: PgPool,
    cache: Arc<CacheManager>,
    metrics: Arc<Metrics>,
) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let app = build_app(build_state(config, db_pool, cache, metrics));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(%addr, "PVZ server listening");

    let signalled = Arc::new(Notify::new());
    let notifier = Arc::clone(&signalled);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            info!("Shutdown signal received, draining connections");
            notifier.notify_one();
        })
        .into_future();

    tokio::select! {
        result = server => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        _ = async {
            signalled.notified().await;
            tokio::time::sleep(grace).await;
        } => {
            warn!(grace_seconds = grace.as_secs(), "Grace period elapsed, closing open connections");
        }
    }

    info!("PVZ server stopped");
    Ok(())
}

/// Waits for Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

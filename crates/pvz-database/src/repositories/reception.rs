//! Reception repository: the open/close state machine.
//!
//! The single-open-reception invariant is enforced by the partial unique
//! index `reception_one_open_per_pvz`, so `open` is a single atomic insert
//! and concurrent callers for the same point cannot both succeed. `close`
//! locks the open row before flipping it, so a concurrent close observes
//! the committed `close` status and finds nothing to close.

use sqlx::{PgConnection, PgPool};
use tracing::debug;

use pvz_core::error::{AppError, ErrorKind};
use pvz_core::result::AppResult;
use pvz_core::types::{PointId, ReceptionId};
use pvz_entity::reception::Reception;

use super::{ONE_OPEN_RECEPTION_INDEX, RECEPTION_COLUMNS};

/// Row lock strength used when pinning the open reception.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLock {
    /// `FOR SHARE`: blocks close and removal, lets other appends proceed.
    Share,
    /// `FOR UPDATE`: exclusive.
    Update,
}

impl RowLock {
    fn clause(self) -> &'static str {
        match self {
            Self::Share => "FOR SHARE",
            Self::Update => "FOR UPDATE",
        }
    }
}

/// Repository for receptions.
#[derive(Debug, Clone)]
pub struct ReceptionRepository {
    pool: PgPool,
}

impl ReceptionRepository {
    /// Create a new reception repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a reception for a point.
    ///
    /// Fails with `Conflict` if the point already has an open reception and
    /// with `NotFound` if the point does not exist.
    pub async fn open(&self, pvz_id: PointId) -> AppResult<Reception> {
        let sql = format!(
            "INSERT INTO reception (id, pvz_id, status) VALUES ($1, $2, 'in_progress') \
             RETURNING {RECEPTION_COLUMNS}"
        );

        sqlx::query_as::<_, Reception>(&sql)
            .bind(ReceptionId::new())
            .bind(pvz_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err)
                    if db_err.constraint() == Some(ONE_OPEN_RECEPTION_INDEX) =>
                {
                    AppError::conflict("PVZ already has an open reception")
                }
                sqlx::Error::Database(ref db_err)
                    if db_err.constraint() == Some("reception_pvz_id_fkey") =>
                {
                    AppError::not_found(format!("PVZ {pvz_id} not found"))
                }
                _ => AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to open reception for PVZ {pvz_id}"),
                    e,
                ),
            })
    }

    /// Close the open reception of a point and return it.
    pub async fn close(&self, pvz_id: PointId) -> AppResult<Reception> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let open = lock_open_for_point(&mut *tx, pvz_id, RowLock::Update)
            .await?
            .ok_or_else(|| AppError::not_found("No open reception found"))?;

        let sql = format!(
            "UPDATE reception SET status = 'close' \
             WHERE id = $1 AND status = 'in_progress' \
             RETURNING {RECEPTION_COLUMNS}"
        );
        let closed = sqlx::query_as::<_, Reception>(&sql)
            .bind(open.id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to close reception {}", open.id),
                    e,
                )
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to commit close of reception {}", open.id),
                e,
            )
        })?;

        debug!(reception_id = %closed.id, pvz_id = %pvz_id, "Reception closed");
        Ok(closed)
    }

    /// Read-only lookup of the open reception of a point.
    pub async fn get_open(&self, pvz_id: PointId) -> AppResult<Reception> {
        self.find_open(pvz_id)
            .await?
            .ok_or_else(|| AppError::not_found("No open reception found"))
    }

    /// Like [`get_open`](Self::get_open) but returns `None` when absent.
    pub async fn find_open(&self, pvz_id: PointId) -> AppResult<Option<Reception>> {
        let sql = format!(
            "SELECT {RECEPTION_COLUMNS} FROM reception \
             WHERE pvz_id = $1 AND status = 'in_progress' \
             ORDER BY date_time DESC LIMIT 1"
        );
        sqlx::query_as::<_, Reception>(&sql)
            .bind(pvz_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to look up open reception for PVZ {pvz_id}"),
                    e,
                )
            })
    }
}

/// Lock the open reception of a point inside `conn`'s transaction.
///
/// The status predicate is re-evaluated against the latest committed row
/// version after the lock is granted, so a reception closed concurrently
/// yields `None`.
pub(crate) async fn lock_open_for_point(
    conn: &mut PgConnection,
    pvz_id: PointId,
    lock: RowLock,
) -> AppResult<Option<Reception>> {
    let sql = format!(
        "SELECT {RECEPTION_COLUMNS} FROM reception \
         WHERE pvz_id = $1 AND status = 'in_progress' \
         ORDER BY date_time DESC LIMIT 1 {}",
        lock.clause()
    );
    sqlx::query_as::<_, Reception>(&sql)
        .bind(pvz_id)
        .fetch_optional(conn)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to lock open reception for PVZ {pvz_id}"),
                e,
            )
        })
}

/// Lock a reception by id inside `conn`'s transaction, but only while it
/// is still open.
pub(crate) async fn lock_if_open(
    conn: &mut PgConnection,
    id: ReceptionId,
    lock: RowLock,
) -> AppResult<Option<Reception>> {
    let sql = format!(
        "SELECT {RECEPTION_COLUMNS} FROM reception \
         WHERE id = $1 AND status = 'in_progress' {}",
        lock.clause()
    );
    sqlx::query_as::<_, Reception>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to lock reception {id}"),
                e,
            )
        })
}

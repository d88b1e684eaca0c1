//! Point registry repository.

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use pvz_core::error::{AppError, ErrorKind};
use pvz_core::result::AppResult;
use pvz_core::types::{DateRange, PageRequest, PointId, ReceptionId};
use pvz_entity::point::{City, Point, PointWithReceptions, ReceptionWithProducts};
use pvz_entity::product::Product;
use pvz_entity::reception::Reception;

use super::{PRODUCT_COLUMNS, RECEPTION_COLUMNS};

/// Repository for pick-up points and the nested listing.
#[derive(Debug, Clone)]
pub struct PointRepository {
    pool: PgPool,
}

impl PointRepository {
    /// Create a new point repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a point. Id and registration date are server-generated.
    pub async fn create(&self, city: City) -> AppResult<Point> {
        sqlx::query_as::<_, Point>(
            "INSERT INTO pvz (id, city) VALUES ($1, $2) RETURNING id, registration_date, city",
        )
        .bind(PointId::new())
        .bind(city)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create PVZ", e))
    }

    /// List points newest first, each with its receptions and products.
    ///
    /// With an active date window only points having at least one reception
    /// inside it are returned, and only in-window receptions are nested.
    /// Pagination applies to points. The three reads share one
    /// repeatable-read snapshot.
    pub async fn list(
        &self,
        page: &PageRequest,
        range: &DateRange,
    ) -> AppResult<Vec<PointWithReceptions>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to set isolation level", e)
            })?;

        let points = sqlx::query_as::<_, Point>(
            "SELECT p.id, p.registration_date, p.city FROM pvz p \
             WHERE NOT $1 OR EXISTS ( \
                SELECT 1 FROM reception r WHERE r.pvz_id = p.id \
                AND ($2::timestamptz IS NULL OR r.date_time >= $2) \
                AND ($3::timestamptz IS NULL OR r.date_time <= $3) \
             ) \
             ORDER BY p.registration_date DESC, p.id \
             LIMIT $4 OFFSET $5",
        )
        .bind(range.is_active())
        .bind(range.start)
        .bind(range.end)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list PVZ", e))?;

        if points.is_empty() {
            return Ok(Vec::new());
        }

        let point_ids: Vec<Uuid> = points.iter().map(|p| p.id.into_uuid()).collect();
        let sql = format!(
            "SELECT {RECEPTION_COLUMNS} FROM reception \
             WHERE pvz_id = ANY($1) \
             AND ($2::timestamptz IS NULL OR date_time >= $2) \
             AND ($3::timestamptz IS NULL OR date_time <= $3) \
             ORDER BY date_time DESC"
        );
        let receptions = sqlx::query_as::<_, Reception>(&sql)
            .bind(&point_ids)
            .bind(range.start)
            .bind(range.end)
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list receptions", e)
            })?;

        let reception_ids: Vec<Uuid> = receptions.iter().map(|r| r.id.into_uuid()).collect();
        let products = if reception_ids.is_empty() {
            Vec::new()
        } else {
            let sql = format!(
                "SELECT {PRODUCT_COLUMNS} FROM product \
                 WHERE reception_id = ANY($1) \
                 ORDER BY date_time, seq"
            );
            sqlx::query_as::<_, Product>(&sql)
                .bind(&reception_ids)
                .fetch_all(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to list products", e)
                })?
        };

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to finish listing", e)
        })?;

        Ok(assemble(points, receptions, products))
    }
}

/// Nest receptions under points and products under receptions, keeping the
/// incoming order of each list.
fn assemble(
    points: Vec<Point>,
    receptions: Vec<Reception>,
    products: Vec<Product>,
) -> Vec<PointWithReceptions> {
    let mut products_by_reception: HashMap<ReceptionId, Vec<Product>> = HashMap::new();
    for product in products {
        products_by_reception
            .entry(product.reception_id)
            .or_default()
            .push(product);
    }

    let mut receptions_by_point: HashMap<PointId, Vec<ReceptionWithProducts>> = HashMap::new();
    for reception in receptions {
        let products = products_by_reception
            .remove(&reception.id)
            .unwrap_or_default();
        receptions_by_point
            .entry(reception.pvz_id)
            .or_default()
            .push(ReceptionWithProducts {
                reception,
                products,
            });
    }

    points
        .into_iter()
        .map(|pvz| PointWithReceptions {
            receptions: receptions_by_point.remove(&pvz.id).unwrap_or_default(),
            pvz,
        })
        .collect()
}

//! Product ledger repository.
//!
//! Both mutations re-check that the target reception is still open at the
//! row lock, inside the same transaction as the write. Appends take a
//! shared lock so they run in parallel with each other; removals take an
//! exclusive lock so two removals never race for the same item.

use sqlx::PgPool;
use tracing::debug;

use pvz_core::error::{AppError, ErrorKind};
use pvz_core::result::AppResult;
use pvz_core::types::{ProductId, ReceptionId};
use pvz_entity::product::{Product, ProductKind};

use super::PRODUCT_COLUMNS;
use super::reception::{RowLock, lock_if_open};

/// Repository for products within receptions.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a product to an open reception.
    ///
    /// Fails with `NotFound` if the reception is missing or no longer open
    /// when the lock is taken.
    pub async fn append(&self, reception_id: ReceptionId, kind: ProductKind) -> AppResult<Product> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        lock_if_open(&mut *tx, reception_id, RowLock::Share)
            .await?
            .ok_or_else(|| AppError::not_found("No open reception found"))?;

        let sql = format!(
            "INSERT INTO product (id, type, reception_id) VALUES ($1, $2, $3) \
             RETURNING {PRODUCT_COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(ProductId::new())
            .bind(kind)
            .bind(reception_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to add product to reception {reception_id}"),
                    e,
                )
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to commit product for reception {reception_id}"),
                e,
            )
        })?;

        debug!(product_id = %product.id, reception_id = %reception_id, "Product appended");
        Ok(product)
    }

    /// Delete and return the most recently added product of an open reception.
    ///
    /// Ordering is `(date_time, seq)`, newest first. Fails with `NotFound`
    /// if the reception is not open or has no products.
    pub async fn remove_last(&self, reception_id: ReceptionId) -> AppResult<Product> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        lock_if_open(&mut *tx, reception_id, RowLock::Update)
            .await?
            .ok_or_else(|| AppError::not_found("No open reception found"))?;

        let sql = format!(
            "DELETE FROM product WHERE id = ( \
                SELECT id FROM product WHERE reception_id = $1 \
                ORDER BY date_time DESC, seq DESC LIMIT 1 \
             ) RETURNING {PRODUCT_COLUMNS}"
        );
        let removed = sqlx::query_as::<_, Product>(&sql)
            .bind(reception_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to delete last product of reception {reception_id}"),
                    e,
                )
            })?
            .ok_or_else(|| AppError::not_found("No products to delete"))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to commit product removal for reception {reception_id}"),
                e,
            )
        })?;

        debug!(product_id = %removed.id, reception_id = %reception_id, "Product removed");
        Ok(removed)
    }
}

//! Adding products to, and removing them from, a point's open reception.
//!
//! The open reception is resolved first; the ledger re-checks that it is
//! still open under a row lock, so a reception closed in between yields
//! not-found rather than a write into a closed reception.

use std::sync::Arc;

use tracing::info;

use pvz_auth::rbac::{Operation, RbacEnforcer};
use pvz_core::error::AppError;
use pvz_core::metrics::Metrics;
use pvz_core::types::PointId;
use pvz_database::repositories::product::ProductRepository;
use pvz_database::repositories::reception::ReceptionRepository;
use pvz_entity::product::{Product, ProductKind};

use crate::context::RequestContext;

/// Appends products and removes the most recent one (LIFO).
#[derive(Debug, Clone)]
pub struct ProductService {
    /// Reception repository, used to find the open reception.
    reception_repo: Arc<ReceptionRepository>,
    /// Product repository.
    product_repo: Arc<ProductRepository>,
    /// RBAC enforcer.
    rbac: Arc<RbacEnforcer>,
    metrics: Arc<Metrics>,
}

impl ProductService {
    /// Creates a new product service.
    pub fn new(
        reception_repo: Arc<ReceptionRepository>,
        product_repo: Arc<ProductRepository>,
        rbac: Arc<RbacEnforcer>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            reception_repo,
            product_repo,
            rbac,
            metrics,
        }
    }

    /// Adds a product of `kind` to the open reception at `pvz_id`.
    pub async fn add(
        &self,
        ctx: &RequestContext,
        pvz_id: PointId,
        kind: ProductKind,
    ) -> Result<Product, AppError> {
        self.rbac.require(ctx.role, Operation::AddProduct)?;

        let reception = self.reception_repo.get_open(pvz_id).await?;
        let product = self.product_repo.append(reception.id, kind).await?;
        self.metrics.product_added();

        info!(
            user_id = %ctx.user_id,
            pvz_id = %pvz_id,
            reception_id = %reception.id,
            product_id = %product.id,
            kind = %kind,
            "Product added"
        );
        Ok(product)
    }

    /// Removes the most recently added product of the open reception at
    /// `pvz_id` and returns it.
    pub async fn remove_last(
        &self,
        ctx: &RequestContext,
        pvz_id: PointId,
    ) -> Result<Product, AppError> {
        self.rbac.require(ctx.role, Operation::RemoveLastProduct)?;

        let reception = self.reception_repo.get_open(pvz_id).await?;
        let product = self.product_repo.remove_last(reception.id).await?;

        info!(
            user_id = %ctx.user_id,
            pvz_id = %pvz_id,
            reception_id = %reception.id,
            product_id = %product.id,
            "Last product removed"
        );
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use pvz_core::error::ErrorKind;
    use pvz_core::types::UserId;
    use pvz_entity::user::UserRole;

    use super::*;
    use crate::test_support::unreachable_pool;

    #[tokio::test]
    async fn test_moderator_cannot_touch_ledger() {
        let pool = unreachable_pool().into_pool();
        let service = ProductService::new(
            Arc::new(ReceptionRepository::new(pool.clone())),
            Arc::new(ProductRepository::new(pool)),
            Arc::new(RbacEnforcer::new()),
            Arc::new(Metrics::new().unwrap()),
        );
        let ctx = RequestContext::new(UserId::new(), UserRole::Moderator);

        let err = service
            .add(&ctx, PointId::new(), ProductKind::Shoes)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let err = service
            .remove_last(&ctx, PointId::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }
}

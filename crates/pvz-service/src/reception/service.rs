//! Opening and closing receptions.

use std::sync::Arc;

use tracing::info;

use pvz_auth::rbac::{Operation, RbacEnforcer};
use pvz_core::error::AppError;
use pvz_core::metrics::Metrics;
use pvz_core::types::PointId;
use pvz_database::repositories::reception::ReceptionRepository;
use pvz_entity::reception::Reception;

use crate::context::RequestContext;

/// Drives the in-progress to closed transition of receptions.
#[derive(Debug, Clone)]
pub struct ReceptionService {
    /// Reception repository.
    reception_repo: Arc<ReceptionRepository>,
    /// RBAC enforcer.
    rbac: Arc<RbacEnforcer>,
    metrics: Arc<Metrics>,
}

impl ReceptionService {
    /// Creates a new reception service.
    pub fn new(
        reception_repo: Arc<ReceptionRepository>,
        rbac: Arc<RbacEnforcer>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            reception_repo,
            rbac,
            metrics,
        }
    }

    /// Opens a reception at `pvz_id`.
    ///
    /// Fails with a conflict if the point already has an open reception.
    pub async fn open(&self, ctx: &RequestContext, pvz_id: PointId) -> Result<Reception, AppError> {
        self.rbac.require(ctx.role, Operation::OpenReception)?;

        let reception = self.reception_repo.open(pvz_id).await?;
        self.metrics.reception_opened();

        info!(
            user_id = %ctx.user_id,
            pvz_id = %pvz_id,
            reception_id = %reception.id,
            "Reception opened"
        );
        Ok(reception)
    }

    /// Closes the open reception at `pvz_id`.
    pub async fn close(
        &self,
        ctx: &RequestContext,
        pvz_id: PointId,
    ) -> Result<Reception, AppError> {
        self.rbac.require(ctx.role, Operation::CloseReception)?;

        let reception = self.reception_repo.close(pvz_id).await?;

        info!(
            user_id = %ctx.user_id,
            pvz_id = %pvz_id,
            reception_id = %reception.id,
            "Reception closed"
        );
        Ok(reception)
    }
}

#[cfg(test)]
mod tests {
    use pvz_core::error::ErrorKind;
    use pvz_core::types::UserId;
    use pvz_entity::user::UserRole;

    use super::*;
    use crate::test_support::unreachable_pool;

    fn service() -> ReceptionService {
        ReceptionService::new(
            Arc::new(ReceptionRepository::new(unreachable_pool().into_pool())),
            Arc::new(RbacEnforcer::new()),
            Arc::new(Metrics::new().unwrap()),
        )
    }

    #[tokio::test]
    async fn test_moderator_cannot_run_receptions() {
        let service = service();
        let ctx = RequestContext::new(UserId::new(), UserRole::Moderator);

        let err = service.open(&ctx, PointId::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let err = service.close(&ctx, PointId::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }
}

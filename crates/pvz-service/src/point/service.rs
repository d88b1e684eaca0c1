//! Point creation and the nested listing.

use std::sync::Arc;

use tracing::info;

use pvz_auth::rbac::{Operation, RbacEnforcer};
use pvz_core::error::AppError;
use pvz_core::metrics::Metrics;
use pvz_core::types::{DateRange, PageRequest};
use pvz_database::repositories::point::PointRepository;
use pvz_entity::point::{City, Point, PointWithReceptions};

use crate::context::RequestContext;

/// Registers points and lists them with their receptions and products.
#[derive(Debug, Clone)]
pub struct PointService {
    /// Point repository.
    point_repo: Arc<PointRepository>,
    /// RBAC enforcer.
    rbac: Arc<RbacEnforcer>,
    metrics: Arc<Metrics>,
}

impl PointService {
    /// Creates a new point service.
    pub fn new(
        point_repo: Arc<PointRepository>,
        rbac: Arc<RbacEnforcer>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            point_repo,
            rbac,
            metrics,
        }
    }

    /// Registers a new point in `city`. Moderators only.
    pub async fn create(&self, ctx: &RequestContext, city: City) -> Result<Point, AppError> {
        self.rbac.require(ctx.role, Operation::CreatePoint)?;

        let point = self.point_repo.create(city).await?;
        self.metrics.point_created();

        info!(
            user_id = %ctx.user_id,
            pvz_id = %point.id,
            city = %point.city,
            "PVZ created"
        );
        Ok(point)
    }

    /// Lists points newest first, one page at a time.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
        range: DateRange,
    ) -> Result<Vec<PointWithReceptions>, AppError> {
        self.rbac.require(ctx.role, Operation::ListPoints)?;

        self.point_repo.list(&page, &range).await
    }
}

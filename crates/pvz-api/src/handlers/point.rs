//! Point handlers.

use std::str::FromStr;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use pvz_auth::rbac::Operation;
use pvz_entity::point::{City, Point, PointWithReceptions};

use crate::dto::request::CreatePointRequest;
use crate::dto::validate;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiQuery, AuthUser, ListPointsQuery};
use crate::state::AppState;

/// POST /pvz
pub async fn create_point(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreatePointRequest>,
) -> Result<(StatusCode, Json<Point>), ApiError> {
    auth.require(Operation::CreatePoint)?;
    validate(&req)?;
    let city = City::from_str(&req.city)?;

    let point = state.point_service.create(auth.context(), city).await?;
    Ok((StatusCode::CREATED, Json(point)))
}

/// GET /pvz
pub async fn list_points(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<ListPointsQuery>,
) -> Result<Json<Vec<PointWithReceptions>>, ApiError> {
    auth.require(Operation::ListPoints)?;
    let (page, range) = query.into_parts()?;

    let points = state
        .point_service
        .list(auth.context(), page, range)
        .await?;
    Ok(Json(points))
}

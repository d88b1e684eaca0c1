//! Reception handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use pvz_auth::rbac::Operation;
use pvz_core::types::PointId;
use pvz_entity::reception::Reception;

use crate::dto::request::OpenReceptionRequest;
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// POST /receptions
pub async fn open_reception(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<OpenReceptionRequest>,
) -> Result<(StatusCode, Json<Reception>), ApiError> {
    auth.require(Operation::OpenReception)?;
    let pvz_id = PointId::parse(&req.pvz_id)?;

    let reception = state
        .reception_service
        .open(auth.context(), pvz_id)
        .await?;
    Ok((StatusCode::CREATED, Json(reception)))
}

/// POST /pvz/{pvzId}/close_last_reception
pub async fn close_last_reception(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(pvz_id): Path<String>,
) -> Result<Json<Reception>, ApiError> {
    auth.require(Operation::CloseReception)?;
    let pvz_id = PointId::parse(&pvz_id)?;

    let reception = state
        .reception_service
        .close(auth.context(), pvz_id)
        .await?;
    Ok(Json(reception))
}

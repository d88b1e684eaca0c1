//! Product handlers.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use pvz_auth::rbac::Operation;
use pvz_core::types::PointId;
use pvz_entity::product::{Product, ProductKind};

use crate::dto::request::AddProductRequest;
use crate::dto::validate;
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// POST /products
pub async fn add_product(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<AddProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    auth.require(Operation::AddProduct)?;
    validate(&req)?;
    let kind = ProductKind::from_str(&req.kind)?;
    let pvz_id = PointId::parse(&req.pvz_id)?;

    let product = state
        .product_service
        .add(auth.context(), pvz_id, kind)
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// POST /pvz/{pvzId}/delete_last_product
pub async fn delete_last_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(pvz_id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    auth.require(Operation::RemoveLastProduct)?;
    let pvz_id = PointId::parse(&pvz_id)?;

    let product = state
        .product_service
        .remove_last(auth.context(), pvz_id)
        .await?;
    Ok(Json(product))
}

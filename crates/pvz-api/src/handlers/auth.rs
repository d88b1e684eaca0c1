//! Auth handlers: dummy login, register, login, logout.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::{DummyLoginRequest, LoginRequest, RegisterRequest};
use crate::dto::response::{TokenResponse, UserResponse};
use crate::dto::validate;
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// POST /dummyLogin
pub async fn dummy_login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<DummyLoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let issued = state.session_service.dummy_login(req.role).await?;
    Ok(Json(TokenResponse {
        token: issued.token,
    }))
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    validate(&req)?;

    let user = state
        .user_service
        .register(&req.email, &req.password, req.role)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    validate(&req)?;

    let issued = state
        .session_service
        .login(&req.email, &req.password)
        .await?;

    Ok(Json(TokenResponse {
        token: issued.token,
    }))
}

/// POST /logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<StatusCode, ApiError> {
    state.session_service.logout(auth.context()).await?;
    Ok(StatusCode::NO_CONTENT)
}

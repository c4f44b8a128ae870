//! Auth handlers — register, login, refresh, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use dochub_service::account::RegisterRequest;

use crate::dto::request::LoginRequest;
use crate::dto::response::{AccountResponse, ApiResponse, LoginResponse};
use crate::error::ApiError;
use crate::extractors::AuthAccount;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AccountResponse>>), ApiError> {
    let account = state.account_service.register(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(AccountResponse::from(account))),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let session = state
        .auth_service
        .login(&req.username, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        access_token: session.token.token,
        token_type: "bearer".to_string(),
        expires_at: session.token.expires_at,
        user: AccountResponse::from(session.account),
    })))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let token = state.auth_service.refresh_session(auth.context())?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        access_token: token.token,
        token_type: "bearer".to_string(),
        expires_at: token.expires_at,
        user: AccountResponse::from(auth.0.account),
    })))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let account = state.account_service.get_profile(auth.context()).await?;
    Ok(Json(ApiResponse::ok(AccountResponse::from(account))))
}

//! Account handlers — profile, stats, premium, admin management.

use axum::Json;
use axum::extract::{Path, Query, State};

use dochub_core::types::AccountId;
use dochub_core::types::pagination::{PageRequest, PageResponse};
use dochub_entity::account::model::ProfileUpdate;
use dochub_service::account::UsageStats;

use crate::dto::request::{ListAccountsQuery, UpdateProfileRequest, UpgradeRequest};
use crate::dto::response::{
    AccountResponse, ApiResponse, MessageResponse, PremiumStatusResponse,
};
use crate::error::ApiError;
use crate::extractors::AuthAccount;
use crate::state::AppState;

/// GET /api/accounts/me
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let account = state.account_service.get_profile(auth.context()).await?;
    Ok(Json(ApiResponse::ok(AccountResponse::from(account))))
}

/// PUT /api/accounts/me
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthAccount,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let account = state
        .account_service
        .update_profile(
            auth.context(),
            ProfileUpdate {
                username: req.username,
                email: req.email,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(AccountResponse::from(account))))
}

/// GET /api/accounts/me/stats
pub async fn usage_stats(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> Result<Json<ApiResponse<UsageStats>>, ApiError> {
    let stats = state.account_service.usage_stats(auth.context()).await?;
    Ok(Json(ApiResponse::ok(stats)))
}

/// GET /api/accounts/me/premium
pub async fn premium_status(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> Result<Json<ApiResponse<PremiumStatusResponse>>, ApiError> {
    let is_premium = state.account_service.is_premium(auth.context()).await?;
    Ok(Json(ApiResponse::ok(PremiumStatusResponse {
        is_premium,
        role: auth.account.role,
        premium_expires_at: auth.account.premium_expires_at,
    })))
}

/// POST /api/accounts/me/upgrade
pub async fn upgrade_premium(
    State(state): State<AppState>,
    auth: AuthAccount,
    Json(req): Json<UpgradeRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let account = state
        .account_service
        .upgrade_premium(auth.context(), req.months)
        .await?;
    Ok(Json(ApiResponse::ok(AccountResponse::from(account))))
}

/// GET /api/accounts (admin)
pub async fn list_accounts(
    State(state): State<AppState>,
    auth: AuthAccount,
    Query(query): Query<ListAccountsQuery>,
) -> Result<Json<ApiResponse<PageResponse<AccountResponse>>>, ApiError> {
    let page = PageRequest::new(query.page, query.page_size);
    let accounts = state
        .account_service
        .list_accounts(auth.context(), &page)
        .await?;

    let items = accounts
        .items
        .into_iter()
        .map(AccountResponse::from)
        .collect();
    Ok(Json(ApiResponse::ok(PageResponse::new(
        items,
        accounts.page,
        accounts.page_size,
        accounts.total_items,
    ))))
}

/// GET /api/accounts/{id} (admin)
pub async fn get_account(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let account = state
        .account_service
        .get_account(auth.context(), AccountId::from_raw(id))
        .await?;
    Ok(Json(ApiResponse::ok(AccountResponse::from(account))))
}

/// PUT /api/accounts/{id}/activate (admin)
pub async fn activate_account(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .account_service
        .set_active(auth.context(), AccountId::from_raw(id), true)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Account activated".to_string(),
    })))
}

/// PUT /api/accounts/{id}/deactivate (admin)
pub async fn deactivate_account(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .account_service
        .set_active(auth.context(), AccountId::from_raw(id), false)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Account deactivated".to_string(),
    })))
}

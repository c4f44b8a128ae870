//! Health check handler.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use dochub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status, `"ok"` when everything is reachable.
    pub status: String,
    /// Whether the database answered.
    pub database: bool,
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let database = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db_pool)
        .await
        .map(|v| v == 1)
        .map_err(|e| AppError::database(format!("Health check failed: {e}")))?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        database,
    }))
}

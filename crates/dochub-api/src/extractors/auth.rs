//! `AuthAccount` extractor — pulls the bearer token from the
//! Authorization header, verifies it, and injects the request context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use dochub_core::error::AppError;
use dochub_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated account context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthAccount(pub RequestContext);

impl AuthAccount {
    /// Return the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthAccount {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthAccount {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError(AppError::authentication("Missing Authorization header")))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError(AppError::authentication(
                "Invalid Authorization header format",
            ))
        })?;

        let ctx = state.auth_service.verify_session(token).await?;
        Ok(AuthAccount(ctx))
    }
}

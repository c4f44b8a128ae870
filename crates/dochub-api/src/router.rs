//! Route definitions for the DocHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The
//! router receives `AppState` and passes it to all handlers via axum's
//! `State` extractor.

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post, put},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(account_routes())
        .merge(document_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: register, login, refresh, me.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/me", get(handlers::auth::me))
}

/// Account self-service and admin endpoints.
fn account_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/accounts/me",
            get(handlers::account::get_profile).put(handlers::account::update_profile),
        )
        .route("/accounts/me/stats", get(handlers::account::usage_stats))
        .route("/accounts/me/premium", get(handlers::account::premium_status))
        .route(
            "/accounts/me/upgrade",
            post(handlers::account::upgrade_premium),
        )
        .route("/accounts", get(handlers::account::list_accounts))
        .route("/accounts/{id}", get(handlers::account::get_account))
        .route(
            "/accounts/{id}/activate",
            put(handlers::account::activate_account),
        )
        .route(
            "/accounts/{id}/deactivate",
            put(handlers::account::deactivate_account),
        )
}

/// Document endpoints.
fn document_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/documents",
            post(handlers::document::create_document).get(handlers::document::list_documents),
        )
        .route(
            "/documents/public",
            get(handlers::document::list_public_documents),
        )
        .route(
            "/documents/{id}",
            get(handlers::document::get_document)
                .put(handlers::document::update_document)
                .delete(handlers::document::delete_document),
        )
        .route(
            "/documents/{id}/convert",
            post(handlers::document::convert_document),
        )
        .route(
            "/documents/{id}/download",
            get(handlers::document::download_document),
        )
        .route(
            "/documents/{id}/share",
            post(handlers::document::share_document),
        )
}

/// Health endpoint.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Build the CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    let origins = &state.config.server.cors.allowed_origins;

    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any)
}

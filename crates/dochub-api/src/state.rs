//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use dochub_auth::password::PasswordHasher;
use dochub_auth::quota::QuotaEnforcer;
use dochub_auth::rbac::RoleGuard;
use dochub_auth::subscription::SubscriptionManager;
use dochub_auth::jwt::TokenService;
use dochub_core::config::AppConfig;
use dochub_database::repositories::{AccountRepository, DocumentRepository};
use dochub_entity::account::store::AccountStore;
use dochub_service::account::AccountService;
use dochub_service::auth::AuthService;
use dochub_service::document::DocumentService;

/// Application state containing all shared dependencies.
///
/// Passed to every axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Authentication and session service.
    pub auth_service: Arc<AuthService>,
    /// Account lifecycle service.
    pub account_service: Arc<AccountService>,
    /// Document lifecycle service.
    pub document_service: Arc<DocumentService>,
}

impl AppState {
    /// Wire all repositories, core components, and services.
    pub fn build(config: AppConfig, db_pool: PgPool) -> Self {
        let account_repo = Arc::new(AccountRepository::new(db_pool.clone()));
        let document_repo = Arc::new(DocumentRepository::new(db_pool.clone()));

        let hasher = Arc::new(PasswordHasher::from_config(&config.auth));
        let tokens = Arc::new(TokenService::new(&config.auth));
        let subscriptions = SubscriptionManager::new();
        let guard = RoleGuard::new();

        let quotas = Arc::new(QuotaEnforcer::new(
            account_repo.clone() as Arc<dyn AccountStore>,
            subscriptions,
            config.quota.clone(),
        ));

        let auth_service = Arc::new(AuthService::new(
            account_repo.clone() as Arc<dyn AccountStore>,
            tokens,
            hasher.clone(),
            subscriptions,
        ));
        let account_service = Arc::new(AccountService::new(
            account_repo,
            hasher,
            subscriptions,
            guard,
        ));
        let document_service = Arc::new(DocumentService::new(document_repo, quotas, guard));

        Self {
            config: Arc::new(config),
            db_pool,
            auth_service,
            account_service,
            document_service,
        }
    }
}

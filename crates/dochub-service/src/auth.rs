//! Authentication flows — login, session verification, refresh.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use dochub_auth::jwt::{IssuedToken, TokenService};
use dochub_auth::password::PasswordHasher;
use dochub_auth::subscription::SubscriptionManager;
use dochub_core::error::AppError;
use dochub_entity::account::store::AccountStore;
use dochub_entity::account::Account;

use crate::context::RequestContext;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    /// The authenticated account.
    pub account: Account,
    /// Freshly issued session token.
    pub token: IssuedToken,
}

/// Handles authentication and session verification.
#[derive(Clone)]
pub struct AuthService {
    /// Account persistence.
    accounts: Arc<dyn AccountStore>,
    /// Session token issuance and verification.
    tokens: Arc<TokenService>,
    /// Password hashing and verification.
    hasher: Arc<PasswordHasher>,
    /// Effective-role derivation.
    subscriptions: SubscriptionManager,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService").finish()
    }
}

impl AuthService {
    /// Create a new auth service.
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        tokens: Arc<TokenService>,
        hasher: Arc<PasswordHasher>,
        subscriptions: SubscriptionManager,
    ) -> Self {
        Self {
            accounts,
            tokens,
            hasher,
            subscriptions,
        }
    }

    /// Authenticate credentials and open a session.
    ///
    /// Unknown usernames and wrong passwords produce the same error so
    /// callers cannot enumerate accounts. Inactive accounts are rejected
    /// only after the password has been verified.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedSession, AppError> {
        let Some(mut account) = self.accounts.find_by_username(username).await? else {
            warn!(username, "Login attempt for unknown username");
            return Err(AppError::authentication("Invalid username or password"));
        };

        if !self.hasher.verify_password(password, &account.password_hash) {
            warn!(account_id = %account.id, "Login attempt with wrong password");
            return Err(AppError::authentication("Invalid username or password"));
        }

        if !account.is_active {
            return Err(AppError::account_inactive("Account has been deactivated"));
        }

        account.last_login_at = Some(Utc::now());
        self.accounts.save(&account).await?;

        let token = self.issue_session(&account)?;
        info!(account_id = %account.id, username = %account.username, "Login successful");

        Ok(AuthenticatedSession { account, token })
    }

    /// Issue a session token for an already-authenticated account.
    pub fn issue_session(&self, account: &Account) -> Result<IssuedToken, AppError> {
        self.tokens.issue(account.id, &account.username)
    }

    /// Verify a bearer token and load the request context.
    ///
    /// Verifies the signature and expiry, reloads the account, rejects
    /// inactive accounts, and derives the effective role for this
    /// request.
    pub async fn verify_session(&self, token: &str) -> Result<RequestContext, AppError> {
        let claims = self.tokens.verify(token)?;

        let account = self
            .accounts
            .find_by_id(claims.account_id())
            .await?
            .ok_or_else(|| AppError::authentication("Account for this token no longer exists"))?;

        if !account.is_active {
            return Err(AppError::account_inactive("Account has been deactivated"));
        }

        let effective_role = self.subscriptions.effective_role(&account, Utc::now());
        Ok(RequestContext::new(account, effective_role))
    }

    /// Re-issue a token for a verified session with a fresh TTL window.
    pub fn refresh_session(&self, ctx: &RequestContext) -> Result<IssuedToken, AppError> {
        self.issue_session(&ctx.account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dochub_core::config::auth::AuthConfig;
    use dochub_core::error::ErrorKind;
    use dochub_database::repositories::MemoryAccountStore;
    use dochub_entity::account::model::NewAccount;
    use dochub_entity::account::Role;

    fn token_service() -> Arc<TokenService> {
        Arc::new(TokenService::new(&AuthConfig {
            secret_key: "service-test-secret".into(),
            token_ttl_minutes: 30,
            hash_cost_factor: 12,
        }))
    }

    async fn service_with_user(
        username: &str,
        password: &str,
    ) -> (AuthService, Arc<MemoryAccountStore>, Account) {
        let store = Arc::new(MemoryAccountStore::new());
        let hasher = Arc::new(PasswordHasher::new(4));
        let account = store
            .create(NewAccount {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password_hash: hasher.hash_password(password).unwrap(),
            })
            .await;

        let service = AuthService::new(
            store.clone(),
            token_service(),
            hasher,
            SubscriptionManager::new(),
        );
        (service, store, account)
    }

    #[tokio::test]
    async fn test_login_and_verify_roundtrip() {
        let (service, _store, account) = service_with_user("alice", "correct horse").await;

        let session = service.login("alice", "correct horse").await.unwrap();
        assert_eq!(session.account.id, account.id);
        assert!(session.account.last_login_at.is_some());

        let ctx = service.verify_session(&session.token.token).await.unwrap();
        assert_eq!(ctx.account.id, account.id);
        assert_eq!(ctx.effective_role, Role::Free);
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_look_alike() {
        let (service, _store, _account) = service_with_user("bob", "secret").await;

        let unknown = service.login("nobody", "secret").await.unwrap_err();
        let wrong = service.login("bob", "not-the-password").await.unwrap_err();

        assert!(unknown.is_kind(ErrorKind::Authentication));
        assert!(wrong.is_kind(ErrorKind::Authentication));
        assert_eq!(unknown.message, wrong.message);
    }

    #[tokio::test]
    async fn test_inactive_account_rejected() {
        let (service, store, mut account) = service_with_user("carol", "pw-carol-1").await;
        account.is_active = false;
        store.put(account).await;

        let err = service.login("carol", "pw-carol-1").await.unwrap_err();
        assert!(err.is_kind(ErrorKind::AccountInactive));
    }

    #[tokio::test]
    async fn test_verify_rejects_garbage_token() {
        let (service, _store, _account) = service_with_user("dave", "pw").await;
        let err = service.verify_session("garbage").await.unwrap_err();
        assert!(err.is_kind(ErrorKind::Authentication));
    }

    #[tokio::test]
    async fn test_refresh_issues_fresh_token() {
        let (service, _store, _account) = service_with_user("erin", "pw-erin").await;
        let session = service.login("erin", "pw-erin").await.unwrap();
        let ctx = service.verify_session(&session.token.token).await.unwrap();

        let refreshed = service.refresh_session(&ctx).unwrap();
        let ctx2 = service.verify_session(&refreshed.token).await.unwrap();
        assert_eq!(ctx2.account.id, ctx.account.id);
    }
}

//! Account self-service and administration — registration, profile,
//! usage stats, premium upgrades, admin management.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use dochub_auth::password::PasswordHasher;
use dochub_auth::rbac::RoleGuard;
use dochub_auth::subscription::SubscriptionManager;
use dochub_core::error::AppError;
use dochub_core::types::AccountId;
use dochub_core::types::pagination::{PageRequest, PageResponse};
use dochub_database::repositories::AccountRepository;
use dochub_entity::account::model::{NewAccount, ProfileUpdate};
use dochub_entity::account::{Account, Role};

use crate::context::RequestContext;

/// Minimum username length.
const USERNAME_MIN: usize = 3;
/// Maximum username length.
const USERNAME_MAX: usize = 50;
/// Minimum password length.
const PASSWORD_MIN: usize = 8;

/// Data for registering a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Desired username (3-50 characters).
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password (hashed before storage).
    pub password: String,
}

/// Usage counters and subscription info for an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageStats {
    /// Live documents owned.
    pub document_count: i64,
    /// Conversions performed.
    pub conversion_count: i64,
    /// Premium expiry, if any.
    pub premium_expires_at: Option<DateTime<Utc>>,
    /// Role as stored on the account.
    pub stored_role: Role,
    /// Role in effect for this request.
    pub effective_role: Role,
}

/// Handles account lifecycle operations.
#[derive(Debug, Clone)]
pub struct AccountService {
    /// Account repository.
    accounts: Arc<AccountRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Subscription state machine.
    subscriptions: SubscriptionManager,
    /// Role hierarchy checks.
    guard: RoleGuard,
}

impl AccountService {
    /// Create a new account service.
    pub fn new(
        accounts: Arc<AccountRepository>,
        hasher: Arc<PasswordHasher>,
        subscriptions: SubscriptionManager,
        guard: RoleGuard,
    ) -> Self {
        Self {
            accounts,
            hasher,
            subscriptions,
            guard,
        }
    }

    /// Register a new free-tier account.
    pub async fn register(&self, req: RegisterRequest) -> Result<Account, AppError> {
        validate_username(&req.username)?;
        validate_email(&req.email)?;
        if req.password.len() < PASSWORD_MIN {
            return Err(AppError::validation(format!(
                "Password must be at least {PASSWORD_MIN} characters"
            )));
        }

        if self
            .accounts
            .find_by_username(&req.username)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Username is already taken"));
        }
        if self.accounts.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::conflict("Email is already registered"));
        }

        let password_hash = self.hasher.hash_password(&req.password)?;
        let account = self
            .accounts
            .create(&NewAccount {
                username: req.username,
                email: req.email,
                password_hash,
            })
            .await?;

        info!(account_id = %account.id, username = %account.username, "Account registered");
        Ok(account)
    }

    /// Reload the acting account's profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> Result<Account, AppError> {
        self.accounts
            .find_by_id(ctx.account_id())
            .await?
            .ok_or_else(|| AppError::not_found("Account not found"))
    }

    /// Update the acting account's profile fields.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        update: ProfileUpdate,
    ) -> Result<Account, AppError> {
        let mut account = self.get_profile(ctx).await?;

        if let Some(username) = update.username {
            validate_username(&username)?;
            if let Some(existing) = self.accounts.find_by_username(&username).await? {
                if existing.id != account.id {
                    return Err(AppError::conflict("Username is already taken"));
                }
            }
            account.username = username;
        }

        if let Some(email) = update.email {
            validate_email(&email)?;
            if let Some(existing) = self.accounts.find_by_email(&email).await? {
                if existing.id != account.id {
                    return Err(AppError::conflict("Email is already registered"));
                }
            }
            account.email = email;
        }

        self.accounts.update(&account).await?;
        info!(account_id = %account.id, "Profile updated");
        Ok(account)
    }

    /// Return usage counters and subscription info for the acting account.
    pub async fn usage_stats(&self, ctx: &RequestContext) -> Result<UsageStats, AppError> {
        let account = self.get_profile(ctx).await?;
        Ok(UsageStats {
            document_count: account.document_count,
            conversion_count: account.conversion_count,
            premium_expires_at: account.premium_expires_at,
            stored_role: account.role,
            effective_role: self.subscriptions.effective_role(&account, Utc::now()),
        })
    }

    /// Check whether the acting account currently has premium privileges.
    ///
    /// Derived from the stored role plus expiry; a lapsed premium account
    /// reports `false` here even though its stored role still says
    /// premium.
    pub async fn is_premium(&self, ctx: &RequestContext) -> Result<bool, AppError> {
        let account = self.get_profile(ctx).await?;
        let role = self.subscriptions.effective_role(&account, Utc::now());
        Ok(role.has_at_least(&Role::Premium))
    }

    /// Upgrade the acting account's premium entitlement by `months`.
    ///
    /// Returns the account with its new expiry.
    pub async fn upgrade_premium(
        &self,
        ctx: &RequestContext,
        months: u32,
    ) -> Result<Account, AppError> {
        let mut account = self.get_profile(ctx).await?;
        self.subscriptions.upgrade(&mut account, months, Utc::now())?;
        self.accounts.update(&account).await?;
        Ok(account)
    }

    /// List all accounts (admin only).
    pub async fn list_accounts(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> Result<PageResponse<Account>, AppError> {
        self.guard.require_admin(&ctx.effective_role)?;
        self.accounts.find_all(page).await
    }

    /// Fetch an account by id (admin only).
    pub async fn get_account(
        &self,
        ctx: &RequestContext,
        id: AccountId,
    ) -> Result<Account, AppError> {
        self.guard.require_admin(&ctx.effective_role)?;
        self.accounts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Account not found"))
    }

    /// Activate or deactivate an account (admin only).
    pub async fn set_active(
        &self,
        ctx: &RequestContext,
        id: AccountId,
        active: bool,
    ) -> Result<Account, AppError> {
        self.guard.require_admin(&ctx.effective_role)?;

        let mut account = self
            .accounts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Account not found"))?;
        account.is_active = active;
        self.accounts.update(&account).await?;

        info!(account_id = %account.id, active, "Account activity changed");
        Ok(account)
    }
}

/// Validate a username against the length rules.
fn validate_username(username: &str) -> Result<(), AppError> {
    let len = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return Err(AppError::validation(format!(
            "Username must be between {USERNAME_MIN} and {USERNAME_MAX} characters"
        )));
    }
    Ok(())
}

/// Validate an email address shape.
fn validate_email(email: &str) -> Result<(), AppError> {
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(AppError::validation("Invalid email address"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_length_rules() {
        assert!(validate_username("ab").is_err());
        assert!(validate_username("abc").is_ok());
        assert!(validate_username(&"x".repeat(50)).is_ok());
        assert!(validate_username(&"x".repeat(51)).is_err());
    }

    #[test]
    fn test_email_shape_rules() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("user@localhost").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("no-at-sign").is_err());
    }
}

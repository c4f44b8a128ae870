//! Premium-expiry state machine and effective-role derivation.
//!
//! The stored role field and the premium expiry are reconciled on every
//! read: [`SubscriptionManager::effective_role`] is the only authority
//! consulted for gating decisions. No background job rewrites lapsed
//! accounts; a premium account whose expiry has passed simply resolves
//! to `free` here.

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use dochub_core::error::AppError;
use dochub_entity::account::{Account, Role};

/// Minimum number of months per upgrade purchase.
const MIN_UPGRADE_MONTHS: u32 = 1;
/// Maximum number of months per upgrade purchase.
const MAX_UPGRADE_MONTHS: u32 = 12;
/// Days of entitlement granted per purchased month.
const DAYS_PER_MONTH: i64 = 30;

/// The subscription state an account is in at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    /// Free tier.
    Free,
    /// Stored role is premium and the expiry is in the future.
    PremiumActive,
    /// Stored role is premium but the expiry has passed; the effective
    /// role resolves to free.
    PremiumLapsed,
    /// Administrator; expiry does not apply.
    Admin,
}

/// Owns the premium-expiry state machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubscriptionManager;

impl SubscriptionManager {
    /// Create a new subscription manager.
    pub fn new() -> Self {
        Self
    }

    /// Classify the account's subscription state at `now`.
    pub fn subscription_state(&self, account: &Account, now: DateTime<Utc>) -> SubscriptionState {
        match account.role {
            Role::Admin => SubscriptionState::Admin,
            Role::Premium => match account.premium_expires_at {
                Some(expires_at) if expires_at > now => SubscriptionState::PremiumActive,
                _ => SubscriptionState::PremiumLapsed,
            },
            Role::Free => SubscriptionState::Free,
        }
    }

    /// Derive the role actually used for authorization decisions.
    ///
    /// Pure function of `(stored_role, premium_expires_at, now)`; the
    /// result is never persisted.
    pub fn effective_role(&self, account: &Account, now: DateTime<Utc>) -> Role {
        match self.subscription_state(account, now) {
            SubscriptionState::Admin => Role::Admin,
            SubscriptionState::PremiumActive => Role::Premium,
            SubscriptionState::PremiumLapsed | SubscriptionState::Free => Role::Free,
        }
    }

    /// Apply a premium upgrade of `months` (1-12) to the account.
    ///
    /// A still-active entitlement is extended from its current expiry; a
    /// missing or lapsed one restarts from `now`. Admin accounts keep
    /// their role but still record the expiry, which `effective_role`
    /// ignores for them.
    pub fn upgrade(
        &self,
        account: &mut Account,
        months: u32,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, AppError> {
        if !(MIN_UPGRADE_MONTHS..=MAX_UPGRADE_MONTHS).contains(&months) {
            return Err(AppError::validation(format!(
                "Upgrade duration must be between {MIN_UPGRADE_MONTHS} and {MAX_UPGRADE_MONTHS} months, got {months}"
            )));
        }

        let granted = Duration::days(DAYS_PER_MONTH * months as i64);
        let new_expires_at = match account.premium_expires_at {
            Some(expires_at) if expires_at > now => expires_at + granted,
            _ => now + granted,
        };

        account.premium_expires_at = Some(new_expires_at);
        if account.role != Role::Admin {
            account.role = Role::Premium;
        }

        info!(
            account_id = %account.id,
            months,
            expires_at = %new_expires_at,
            "Premium subscription upgraded"
        );

        Ok(new_expires_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dochub_core::types::AccountId;

    fn account(role: Role, premium_expires_at: Option<DateTime<Utc>>) -> Account {
        let now = Utc::now();
        Account {
            id: AccountId::from_raw(1),
            username: "tester".into(),
            email: "tester@example.com".into(),
            password_hash: "x".into(),
            role,
            premium_expires_at,
            is_active: true,
            document_count: 0,
            conversion_count: 0,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    #[test]
    fn test_active_premium_resolves_premium() {
        let mgr = SubscriptionManager::new();
        let now = Utc::now();
        let acct = account(Role::Premium, Some(now + Duration::days(10)));

        assert_eq!(mgr.subscription_state(&acct, now), SubscriptionState::PremiumActive);
        assert_eq!(mgr.effective_role(&acct, now), Role::Premium);
    }

    #[test]
    fn test_lapsed_premium_resolves_free() {
        let mgr = SubscriptionManager::new();
        let now = Utc::now();
        let acct = account(Role::Premium, Some(now - Duration::days(1)));

        assert_eq!(mgr.subscription_state(&acct, now), SubscriptionState::PremiumLapsed);
        assert_eq!(mgr.effective_role(&acct, now), Role::Free);
    }

    #[test]
    fn test_premium_without_expiry_resolves_free() {
        let mgr = SubscriptionManager::new();
        let now = Utc::now();
        let acct = account(Role::Premium, None);

        assert_eq!(mgr.effective_role(&acct, now), Role::Free);
    }

    #[test]
    fn test_admin_ignores_expiry() {
        let mgr = SubscriptionManager::new();
        let now = Utc::now();
        let acct = account(Role::Admin, Some(now - Duration::days(365)));

        assert_eq!(mgr.subscription_state(&acct, now), SubscriptionState::Admin);
        assert_eq!(mgr.effective_role(&acct, now), Role::Admin);
    }

    #[test]
    fn test_upgrade_extends_active_entitlement() {
        let mgr = SubscriptionManager::new();
        let now = Utc::now();
        let current = now + Duration::days(10);
        let mut acct = account(Role::Premium, Some(current));

        let new_expiry = mgr.upgrade(&mut acct, 3, now).unwrap();
        assert_eq!(new_expiry, current + Duration::days(90));
        assert_eq!(acct.role, Role::Premium);
    }

    #[test]
    fn test_upgrade_restarts_lapsed_entitlement() {
        let mgr = SubscriptionManager::new();
        let now = Utc::now();
        let mut acct = account(Role::Premium, Some(now - Duration::days(40)));

        let new_expiry = mgr.upgrade(&mut acct, 1, now).unwrap();
        assert_eq!(new_expiry, now + Duration::days(30));
    }

    #[test]
    fn test_upgrade_promotes_free_account() {
        let mgr = SubscriptionManager::new();
        let now = Utc::now();
        let mut acct = account(Role::Free, None);

        mgr.upgrade(&mut acct, 6, now).unwrap();
        assert_eq!(acct.role, Role::Premium);
        assert_eq!(acct.premium_expires_at, Some(now + Duration::days(180)));
    }

    #[test]
    fn test_upgrade_keeps_admin_role() {
        let mgr = SubscriptionManager::new();
        let now = Utc::now();
        let mut acct = account(Role::Admin, None);

        mgr.upgrade(&mut acct, 2, now).unwrap();
        assert_eq!(acct.role, Role::Admin);
        assert!(acct.premium_expires_at.is_some());
        assert_eq!(mgr.effective_role(&acct, now), Role::Admin);
    }

    #[test]
    fn test_upgrade_months_out_of_range() {
        let mgr = SubscriptionManager::new();
        let now = Utc::now();
        let mut acct = account(Role::Free, None);

        assert!(mgr.upgrade(&mut acct, 0, now).is_err());
        assert!(mgr.upgrade(&mut acct, 13, now).is_err());
        assert_eq!(acct.premium_expires_at, None);
    }
}

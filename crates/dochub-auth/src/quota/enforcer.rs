//! Atomic check-and-increment of per-account usage counters.
//!
//! Limits apply only to accounts whose *effective* role is free; premium
//! and admin accounts are unconstrained. The limit check rides inside the
//! store's conditional adjustment, so concurrent reservations behave as
//! if serialized per account: with a limit of 5, any number of racing
//! requests yields exactly 5 successes.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use dochub_core::config::quota::QuotaConfig;
use dochub_core::error::AppError;
use dochub_entity::account::store::{AccountStore, CounterAdjust};
use dochub_entity::account::{Account, CounterKind, Role};

use crate::subscription::SubscriptionManager;

/// Enforces free-tier usage limits through atomic counter updates.
#[derive(Clone)]
pub struct QuotaEnforcer {
    /// Account store providing the conditional counter update.
    store: Arc<dyn AccountStore>,
    /// Authority for effective-role derivation.
    subscriptions: SubscriptionManager,
    /// Free-tier limits.
    config: QuotaConfig,
}

impl std::fmt::Debug for QuotaEnforcer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuotaEnforcer")
            .field("config", &self.config)
            .finish()
    }
}

impl QuotaEnforcer {
    /// Create a new quota enforcer.
    pub fn new(
        store: Arc<dyn AccountStore>,
        subscriptions: SubscriptionManager,
        config: QuotaConfig,
    ) -> Self {
        Self {
            store,
            subscriptions,
            config,
        }
    }

    /// Reserve one unit of the given counter for the account.
    ///
    /// For accounts whose effective role is free the increment only
    /// happens if the counter stays within the configured limit; the
    /// check and the increment execute as a single atomic unit against
    /// the stored value.
    pub async fn reserve(&self, account: &Account, kind: CounterKind) -> Result<(), AppError> {
        let limit = match self.subscriptions.effective_role(account, Utc::now()) {
            Role::Free => Some(self.limit_for(kind)),
            Role::Premium | Role::Admin => None,
        };

        match self.store.adjust_counter(account.id, kind, 1, limit).await? {
            CounterAdjust::Updated(value) => {
                debug!(account_id = %account.id, kind = %kind, value, "Quota reserved");
                Ok(())
            }
            CounterAdjust::LimitExceeded => Err(AppError::quota_exceeded(format!(
                "Free-tier {kind} limit of {} reached; upgrade to premium for unlimited use",
                self.limit_for(kind)
            ))),
        }
    }

    /// Release one unit of the given counter (e.g. on document deletion).
    ///
    /// Always succeeds; the counter is floored at zero.
    pub async fn release(&self, account: &Account, kind: CounterKind) -> Result<(), AppError> {
        let adjusted = self.store.adjust_counter(account.id, kind, -1, None).await?;
        if let CounterAdjust::Updated(value) = adjusted {
            debug!(account_id = %account.id, kind = %kind, value, "Quota released");
        }
        Ok(())
    }

    /// Return the free-tier limit for a counter kind.
    pub fn limit_for(&self, kind: CounterKind) -> i64 {
        match kind {
            CounterKind::Document => self.config.free_document_limit,
            CounterKind::Conversion => self.config.free_conversion_limit,
        }
    }
}

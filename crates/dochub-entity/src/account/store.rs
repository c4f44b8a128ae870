//! Account store contract consumed by the auth and quota core.
//!
//! The core components are written against this trait rather than a
//! concrete repository so that counter semantics can be tested without a
//! database and swapped between backends. Implementations must make
//! [`AccountStore::adjust_counter`] atomic: the limit check and the
//! increment happen as one unit against the counter's current stored
//! value, never as separate read-then-write steps.

use async_trait::async_trait;

use dochub_core::AppResult;
use dochub_core::types::AccountId;

use super::counter::CounterKind;
use super::model::Account;

/// Outcome of a conditional counter adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterAdjust {
    /// The counter was adjusted; carries the new value.
    Updated(i64),
    /// Applying the delta would have exceeded the supplied limit; the
    /// counter is unchanged.
    LimitExceeded,
}

/// Persistence contract for accounts as seen by the auth/quota core.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Load an account by primary key.
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>>;

    /// Load an account by username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>>;

    /// Atomically apply `delta` to the given counter.
    ///
    /// When `limit` is `Some(max)`, the adjustment only happens if the
    /// resulting value stays at or below `max`; otherwise
    /// [`CounterAdjust::LimitExceeded`] is returned and nothing changes.
    /// Negative deltas are floored at zero and always succeed.
    ///
    /// Returns a not-found error if the account does not exist.
    async fn adjust_counter(
        &self,
        id: AccountId,
        kind: CounterKind,
        delta: i64,
        limit: Option<i64>,
    ) -> AppResult<CounterAdjust>;

    /// Persist mutable account fields (role, expiry, activity, profile).
    async fn save(&self, account: &Account) -> AppResult<()>;
}

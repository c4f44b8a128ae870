//! In-memory account store using a Tokio mutex for tests and single-node
//! development.
//!
//! Holding the mutex across the whole check-and-increment gives the same
//! serialization guarantee the SQL implementation gets from its single
//! conditional `UPDATE`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use dochub_core::AppError;
use dochub_core::result::AppResult;
use dochub_core::types::AccountId;
use dochub_entity::account::model::NewAccount;
use dochub_entity::account::store::{AccountStore, CounterAdjust};
use dochub_entity::account::{Account, CounterKind, Role};

/// Internal state for the memory-based account store.
#[derive(Debug, Default)]
struct InnerState {
    /// Accounts keyed by id.
    accounts: HashMap<AccountId, Account>,
    /// Next id to assign.
    next_id: i64,
}

/// In-memory account store.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccountStore {
    /// Protected inner state.
    state: Arc<Mutex<InnerState>>,
}

impl MemoryAccountStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new free-tier account and return the stored row.
    pub async fn create(&self, new: NewAccount) -> Account {
        let mut state = self.state.lock().await;
        state.next_id += 1;
        let now = Utc::now();
        let account = Account {
            id: AccountId::from_raw(state.next_id),
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            role: Role::Free,
            premium_expires_at: None,
            is_active: true,
            document_count: 0,
            conversion_count: 0,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        };
        state.accounts.insert(account.id, account.clone());
        account
    }

    /// Insert or replace a fully-specified account (test seeding).
    pub async fn put(&self, account: Account) {
        let mut state = self.state.lock().await;
        state.next_id = state.next_id.max(account.id.into_inner());
        state.accounts.insert(account.id, account);
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        let state = self.state.lock().await;
        Ok(state.accounts.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        let state = self.state.lock().await;
        Ok(state
            .accounts
            .values()
            .find(|a| a.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    async fn adjust_counter(
        &self,
        id: AccountId,
        kind: CounterKind,
        delta: i64,
        limit: Option<i64>,
    ) -> AppResult<CounterAdjust> {
        let mut state = self.state.lock().await;
        let account = state
            .accounts
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Account not found"))?;

        let counter = match kind {
            CounterKind::Document => &mut account.document_count,
            CounterKind::Conversion => &mut account.conversion_count,
        };

        let next = *counter + delta;
        if let Some(max) = limit {
            if next > max {
                return Ok(CounterAdjust::LimitExceeded);
            }
        }

        *counter = next.max(0);
        let value = *counter;
        account.updated_at = Utc::now();
        Ok(CounterAdjust::Updated(value))
    }

    async fn save(&self, account: &Account) -> AppResult<()> {
        let mut state = self.state.lock().await;
        let existing = state
            .accounts
            .get_mut(&account.id)
            .ok_or_else(|| AppError::not_found("Account not found"))?;

        // Counters are owned by adjust_counter; keep the stored values.
        let document_count = existing.document_count;
        let conversion_count = existing.conversion_count;
        *existing = account.clone();
        existing.document_count = document_count;
        existing.conversion_count = conversion_count;
        existing.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = MemoryAccountStore::new();
        let a = store
            .create(NewAccount {
                username: "alice".into(),
                email: "alice@example.com".into(),
                password_hash: "x".into(),
            })
            .await;
        let b = store
            .create(NewAccount {
                username: "bob".into(),
                email: "bob@example.com".into(),
                password_hash: "x".into(),
            })
            .await;
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn test_adjust_counter_respects_limit() {
        let store = MemoryAccountStore::new();
        let account = store
            .create(NewAccount {
                username: "carol".into(),
                email: "carol@example.com".into(),
                password_hash: "x".into(),
            })
            .await;

        for _ in 0..2 {
            let result = store
                .adjust_counter(account.id, CounterKind::Document, 1, Some(2))
                .await
                .unwrap();
            assert!(matches!(result, CounterAdjust::Updated(_)));
        }

        let result = store
            .adjust_counter(account.id, CounterKind::Document, 1, Some(2))
            .await
            .unwrap();
        assert_eq!(result, CounterAdjust::LimitExceeded);
    }

    #[tokio::test]
    async fn test_negative_delta_floors_at_zero() {
        let store = MemoryAccountStore::new();
        let account = store
            .create(NewAccount {
                username: "dave".into(),
                email: "dave@example.com".into(),
                password_hash: "x".into(),
            })
            .await;

        let result = store
            .adjust_counter(account.id, CounterKind::Conversion, -1, None)
            .await
            .unwrap();
        assert_eq!(result, CounterAdjust::Updated(0));
    }

    #[tokio::test]
    async fn test_save_preserves_counters() {
        let store = MemoryAccountStore::new();
        let mut account = store
            .create(NewAccount {
                username: "erin".into(),
                email: "erin@example.com".into(),
                password_hash: "x".into(),
            })
            .await;

        store
            .adjust_counter(account.id, CounterKind::Document, 1, None)
            .await
            .unwrap();

        account.role = Role::Premium;
        account.document_count = 999; // must be ignored by save
        store.save(&account).await.unwrap();

        let stored = store.find_by_id(account.id).await.unwrap().unwrap();
        assert_eq!(stored.role, Role::Premium);
        assert_eq!(stored.document_count, 1);
    }
}

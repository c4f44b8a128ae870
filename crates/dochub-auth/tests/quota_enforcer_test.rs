//! Quota enforcement tests against the in-memory account store.

use std::sync::Arc;

use chrono::{Duration, Utc};

use dochub_auth::quota::QuotaEnforcer;
use dochub_auth::subscription::SubscriptionManager;
use dochub_core::config::quota::QuotaConfig;
use dochub_core::error::ErrorKind;
use dochub_database::repositories::MemoryAccountStore;
use dochub_entity::account::model::NewAccount;
use dochub_entity::account::store::AccountStore;
use dochub_entity::account::{Account, CounterKind, Role};

fn quota_config() -> QuotaConfig {
    QuotaConfig {
        free_document_limit: 5,
        free_conversion_limit: 10,
    }
}

async fn new_account(store: &MemoryAccountStore, username: &str) -> Account {
    store
        .create(NewAccount {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "x".to_string(),
        })
        .await
}

fn enforcer(store: &Arc<MemoryAccountStore>) -> QuotaEnforcer {
    QuotaEnforcer::new(store.clone(), SubscriptionManager::new(), quota_config())
}

#[tokio::test]
async fn test_free_account_hits_document_limit() {
    let store = Arc::new(MemoryAccountStore::new());
    let account = new_account(&store, "freeuser").await;
    let quotas = enforcer(&store);

    for _ in 0..5 {
        quotas
            .reserve(&account, CounterKind::Document)
            .await
            .expect("within limit");
    }

    let err = quotas
        .reserve(&account, CounterKind::Document)
        .await
        .unwrap_err();
    assert!(err.is_kind(ErrorKind::QuotaExceeded));

    let stored = store.find_by_id(account.id).await.unwrap().unwrap();
    assert_eq!(stored.document_count, 5);
}

#[tokio::test]
async fn test_premium_account_is_unconstrained() {
    let store = Arc::new(MemoryAccountStore::new());
    let mut account = new_account(&store, "premiumuser").await;
    account.role = Role::Premium;
    account.premium_expires_at = Some(Utc::now() + Duration::days(30));
    store.put(account.clone()).await;

    let quotas = enforcer(&store);

    // Far past the free limit; every reservation must succeed.
    for _ in 0..1000 {
        quotas
            .reserve(&account, CounterKind::Document)
            .await
            .expect("premium is unlimited");
    }

    let stored = store.find_by_id(account.id).await.unwrap().unwrap();
    assert_eq!(stored.document_count, 1000);
}

#[tokio::test]
async fn test_lapsed_premium_gets_free_limits() {
    let store = Arc::new(MemoryAccountStore::new());
    let mut account = new_account(&store, "lapseduser").await;
    account.role = Role::Premium;
    account.premium_expires_at = Some(Utc::now() - Duration::days(1));
    store.put(account.clone()).await;

    let quotas = enforcer(&store);

    for _ in 0..5 {
        quotas
            .reserve(&account, CounterKind::Document)
            .await
            .expect("within free limit");
    }

    // The stored role still says premium, but the lapsed entitlement
    // means free limits apply.
    let err = quotas
        .reserve(&account, CounterKind::Document)
        .await
        .unwrap_err();
    assert!(err.is_kind(ErrorKind::QuotaExceeded));
}

#[tokio::test]
async fn test_conversion_limit_is_independent() {
    let store = Arc::new(MemoryAccountStore::new());
    let account = new_account(&store, "convuser").await;
    let quotas = enforcer(&store);

    for _ in 0..10 {
        quotas
            .reserve(&account, CounterKind::Conversion)
            .await
            .expect("within limit");
    }
    let err = quotas
        .reserve(&account, CounterKind::Conversion)
        .await
        .unwrap_err();
    assert!(err.is_kind(ErrorKind::QuotaExceeded));

    // Document quota is untouched.
    quotas
        .reserve(&account, CounterKind::Document)
        .await
        .expect("document quota independent of conversions");
}

#[tokio::test]
async fn test_release_always_succeeds_and_floors_at_zero() {
    let store = Arc::new(MemoryAccountStore::new());
    let account = new_account(&store, "releaseuser").await;
    let quotas = enforcer(&store);

    quotas
        .release(&account, CounterKind::Document)
        .await
        .expect("release on empty counter succeeds");

    let stored = store.find_by_id(account.id).await.unwrap().unwrap();
    assert_eq!(stored.document_count, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_reservations_never_exceed_limit() {
    let store = Arc::new(MemoryAccountStore::new());
    let account = new_account(&store, "raceuser").await;
    let quotas = enforcer(&store);

    let concurrency = 32usize;
    let handles: Vec<_> = (0..concurrency)
        .map(|_| {
            let quotas = quotas.clone();
            let account = account.clone();
            tokio::spawn(async move { quotas.reserve(&account, CounterKind::Document).await })
        })
        .collect();

    let mut successes = 0usize;
    let mut rejections = 0usize;
    for handle in handles {
        match handle.await.expect("task panicked") {
            Ok(()) => successes += 1,
            Err(e) => {
                assert!(e.is_kind(ErrorKind::QuotaExceeded));
                rejections += 1;
            }
        }
    }

    assert_eq!(successes, 5);
    assert_eq!(rejections, concurrency - 5);

    let stored = store.find_by_id(account.id).await.unwrap().unwrap();
    assert_eq!(stored.document_count, 5);
}

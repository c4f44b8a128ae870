//! Account repository implementation.
//!
//! Counter columns are only ever written through
//! [`AccountStore::adjust_counter`], which folds the limit check and the
//! increment into a single conditional `UPDATE`. [`AccountRepository::update`]
//! deliberately leaves them untouched.

use async_trait::async_trait;
use sqlx::PgPool;

use dochub_core::error::{AppError, ErrorKind};
use dochub_core::result::AppResult;
use dochub_core::types::AccountId;
use dochub_core::types::pagination::{PageRequest, PageResponse};
use dochub_entity::account::model::NewAccount;
use dochub_entity::account::store::{AccountStore, CounterAdjust};
use dochub_entity::account::{Account, CounterKind};

/// Repository for account CRUD and query operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Create a new account repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an account by primary key.
    pub async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by id", e)
            })
    }

    /// Find an account by username (case-insensitive).
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE LOWER(username) = LOWER($1)")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by username", e)
            })
    }

    /// Find an account by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by email", e)
            })
    }

    /// List all accounts with pagination.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Account>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count accounts", e)
            })?;

        let accounts = sqlx::query_as::<_, Account>(
            "SELECT * FROM accounts ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list accounts", e))?;

        Ok(PageResponse::new(
            accounts,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Insert a new account and return the stored row.
    pub async fn create(&self, new: &NewAccount) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (username, email, password_hash) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&new.username)
        .bind(&new.email)
        .bind(&new.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)
    }

    /// Update the mutable, non-counter fields of an account.
    pub async fn update(&self, account: &Account) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE accounts SET username = $2, email = $3, password_hash = $4, role = $5, \
             premium_expires_at = $6, is_active = $7, last_login_at = $8, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(account.id)
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.role)
        .bind(account.premium_expires_at)
        .bind(account.is_active)
        .bind(account.last_login_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Account not found"));
        }
        Ok(())
    }

    /// Stamp the last successful login time.
    pub async fn touch_last_login(&self, id: AccountId) -> AppResult<()> {
        sqlx::query("UPDATE accounts SET last_login_at = NOW(), updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update last login", e)
            })?;
        Ok(())
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        AccountRepository::find_by_id(self, id).await
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        AccountRepository::find_by_username(self, username).await
    }

    async fn adjust_counter(
        &self,
        id: AccountId,
        kind: CounterKind,
        delta: i64,
        limit: Option<i64>,
    ) -> AppResult<CounterAdjust> {
        let column = match kind {
            CounterKind::Document => "document_count",
            CounterKind::Conversion => "conversion_count",
        };

        // Single conditional statement: the limit check and the increment
        // are evaluated against the same stored value inside one UPDATE,
        // so concurrent adjustments cannot both pass a stale check.
        let sql = format!(
            "UPDATE accounts \
             SET {column} = GREATEST({column} + $2, 0), updated_at = NOW() \
             WHERE id = $1 AND ($3::BIGINT IS NULL OR {column} + $2 <= $3) \
             RETURNING {column}"
        );

        let updated: Option<i64> = sqlx::query_scalar(&sql)
            .bind(id)
            .bind(delta)
            .bind(limit)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to adjust usage counter", e)
            })?;

        match updated {
            Some(value) => Ok(CounterAdjust::Updated(value)),
            None => {
                let exists: bool =
                    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE id = $1)")
                        .bind(id)
                        .fetch_one(&self.pool)
                        .await
                        .map_err(|e| {
                            AppError::with_source(ErrorKind::Database, "Failed to check account", e)
                        })?;
                if exists {
                    Ok(CounterAdjust::LimitExceeded)
                } else {
                    Err(AppError::not_found("Account not found"))
                }
            }
        }
    }

    async fn save(&self, account: &Account) -> AppResult<()> {
        self.update(account).await
    }
}

/// Map a PostgreSQL unique violation onto a conflict error; everything
/// else stays a database error.
fn map_unique_violation(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &e {
        if db.code().as_deref() == Some("23505") {
            return AppError::conflict("Username or email is already in use");
        }
    }
    AppError::with_source(ErrorKind::Database, "Account write failed", e)
}

//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use dochub_core::types::AccountId;

use super::role::Role;

/// A registered account in the DocHub system.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// Unique account identifier.
    pub id: AccountId,
    /// Unique login name (3-50 characters).
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Stored role. Authorization always derives the effective role from
    /// this field plus `premium_expires_at`; a lapsed premium account keeps
    /// `Premium` here until (if ever) reconciled.
    pub role: Role,
    /// When the premium entitlement lapses. Ignored for admins.
    pub premium_expires_at: Option<DateTime<Utc>>,
    /// Whether the account may log in.
    pub is_active: bool,
    /// Number of live (non-tombstoned) documents owned.
    pub document_count: i64,
    /// Number of conversions performed.
    pub conversion_count: i64,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Data required to create a new account.
///
/// New accounts always start on the free tier, active, with zeroed
/// counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccount {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
}

/// Data for updating an account's own profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New username (optional).
    pub username: Option<String>,
    /// New email address (optional).
    pub email: Option<String>,
}

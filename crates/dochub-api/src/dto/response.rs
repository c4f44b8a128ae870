//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dochub_core::types::AccountId;
use dochub_entity::account::{Account, Role};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

/// Account summary for responses (never includes the password hash).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: AccountId,
    /// Username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Stored role.
    pub role: Role,
    /// Premium expiry, if any.
    pub premium_expires_at: Option<DateTime<Utc>>,
    /// Whether the account is active.
    pub is_active: bool,
    /// Live documents owned.
    pub document_count: i64,
    /// Conversions performed.
    pub conversion_count: i64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last login time.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            role: account.role,
            premium_expires_at: account.premium_expires_at,
            is_active: account.is_active,
            document_count: account.document_count,
            conversion_count: account.conversion_count,
            created_at: account.created_at,
            last_login_at: account.last_login_at,
        }
    }
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer session token.
    pub access_token: String,
    /// Token type, always `"bearer"`.
    pub token_type: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
    /// The authenticated account.
    pub user: AccountResponse,
}

/// Premium status response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PremiumStatusResponse {
    /// Whether premium privileges are currently in effect.
    pub is_premium: bool,
    /// Stored role.
    pub role: Role,
    /// Premium expiry, if any.
    pub premium_expires_at: Option<DateTime<Utc>>,
}

/// Conversion result response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertResponse {
    /// Human-readable message.
    pub message: String,
    /// The converted document's ID.
    pub document_id: i64,
    /// Where the rendered output can be fetched.
    pub download_url: String,
}

//! Session token claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dochub_core::types::AccountId;

/// Claim set embedded in every session token.
///
/// Tokens are stateless: possession of a validly signed, unexpired token
/// is sufficient proof of identity. There is no server-side revocation
/// list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the username.
    pub sub: String,
    /// The account's numeric identifier.
    pub user_id: i64,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Return the account ID from the claims.
    pub fn account_id(&self) -> AccountId {
        AccountId::from_raw(self.user_id)
    }

    /// Return the username from the subject claim.
    pub fn username(&self) -> &str {
        &self.sub
    }

    /// Return the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}

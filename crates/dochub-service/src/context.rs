//! Request context carrying the authenticated account into services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dochub_core::types::AccountId;
use dochub_entity::account::{Account, Role};

/// Context for the current authenticated request.
///
/// Built by the transport layer after token verification and passed into
/// service methods so that every operation knows *who* is acting and with
/// *which* effective role. The effective role is derived once per request
/// at verification time; the stored role on the account is never used for
/// gating directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated account as loaded for this request.
    pub account: Account,
    /// The effective role derived at verification time.
    pub effective_role: Role,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Create a new request context.
    pub fn new(account: Account, effective_role: Role) -> Self {
        Self {
            account,
            effective_role,
            request_time: Utc::now(),
        }
    }

    /// Return the acting account's ID.
    pub fn account_id(&self) -> AccountId {
        self.account.id
    }

    /// Return the acting account's username.
    pub fn username(&self) -> &str {
        &self.account.username
    }
}

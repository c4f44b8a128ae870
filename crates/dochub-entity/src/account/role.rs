//! Account role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account tiers, ordered by privilege level: Admin > Premium > Free.
///
/// The value stored on an account is only one input to authorization:
/// gating decisions use the *effective* role derived from the stored role
/// plus the premium expiry, never this field alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Free tier, subject to usage limits.
    Free,
    /// Paid tier with a time-bound entitlement.
    Premium,
    /// Full administrator, immune to expiry and limits.
    Admin,
}

impl Role {
    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Admin => 3,
            Self::Premium => 2,
            Self::Free => 1,
        }
    }

    /// Check if this role has at least the given role's privileges.
    pub fn has_at_least(&self, other: &Role) -> bool {
        self.privilege_level() >= other.privilege_level()
    }

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Premium => "premium",
            Self::Free => "free",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = dochub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "premium" => Ok(Self::Premium),
            "free" => Ok(Self::Free),
            _ => Err(dochub_core::AppError::validation(format!(
                "Invalid account role: '{s}'. Expected one of: free, premium, admin"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privilege_ordering() {
        assert!(Role::Admin.has_at_least(&Role::Premium));
        assert!(Role::Premium.has_at_least(&Role::Free));
        assert!(Role::Premium.has_at_least(&Role::Premium));
        assert!(!Role::Free.has_at_least(&Role::Premium));
        assert!(!Role::Premium.has_at_least(&Role::Admin));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("PREMIUM".parse::<Role>().unwrap(), Role::Premium);
        assert!("superuser".parse::<Role>().is_err());
    }
}

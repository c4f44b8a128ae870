//! Role hierarchy enforcement.
//!
//! Callers must pass the *effective* role (derived via the subscription
//! manager), never the raw stored role. The guard itself is a pure
//! comparison and returns a forbidden error rather than panicking so
//! rejections map uniformly at the transport boundary.

use dochub_core::error::AppError;
use dochub_entity::account::Role;

/// Enforces the role hierarchy: free < premium < admin.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleGuard;

impl RoleGuard {
    /// Create a new role guard.
    pub fn new() -> Self {
        Self
    }

    /// Check whether `effective_role` meets the required minimum.
    pub fn has_min_role(&self, effective_role: &Role, minimum: &Role) -> bool {
        effective_role.has_at_least(minimum)
    }

    /// Require that `effective_role` meets the minimum, or fail with a
    /// forbidden error.
    pub fn require_min_role(&self, effective_role: &Role, minimum: &Role) -> Result<(), AppError> {
        if self.has_min_role(effective_role, minimum) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Role '{effective_role}' is insufficient; minimum required: '{minimum}'"
            )))
        }
    }

    /// Require the admin role exactly.
    pub fn require_admin(&self, effective_role: &Role) -> Result<(), AppError> {
        if effective_role.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden("Administrator role required"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dochub_core::error::ErrorKind;

    #[test]
    fn test_hierarchy_is_strict() {
        let guard = RoleGuard::new();
        assert!(guard.require_min_role(&Role::Admin, &Role::Premium).is_ok());
        assert!(guard.require_min_role(&Role::Premium, &Role::Premium).is_ok());
        assert!(guard.require_min_role(&Role::Free, &Role::Free).is_ok());

        let err = guard
            .require_min_role(&Role::Free, &Role::Premium)
            .unwrap_err();
        assert!(err.is_kind(ErrorKind::Forbidden));
    }

    #[test]
    fn test_admin_gate_requires_admin_exactly() {
        let guard = RoleGuard::new();
        assert!(guard.require_admin(&Role::Admin).is_ok());
        assert!(guard.require_admin(&Role::Premium).is_err());
        assert!(guard.require_admin(&Role::Free).is_err());
    }
}

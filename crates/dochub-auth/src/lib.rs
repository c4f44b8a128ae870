//! # dochub-auth
//!
//! Authentication, authorization, and quota/subscription core for DocHub.
//!
//! ## Modules
//!
//! - `jwt` — signed, self-contained session token issuance and verification
//! - `password` — Argon2id password hashing and verification
//! - `rbac` — role hierarchy checks (free < premium < admin)
//! - `subscription` — premium-expiry state machine and effective-role derivation
//! - `quota` — atomic check-and-increment of per-account usage counters

pub mod jwt;
pub mod password;
pub mod quota;
pub mod rbac;
pub mod subscription;

pub use jwt::{Claims, TokenError, TokenService};
pub use password::PasswordHasher;
pub use quota::QuotaEnforcer;
pub use rbac::RoleGuard;
pub use subscription::{SubscriptionManager, SubscriptionState};

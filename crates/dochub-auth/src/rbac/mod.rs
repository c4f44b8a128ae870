//! Role-based access checks.

pub mod guard;

pub use guard::RoleGuard;

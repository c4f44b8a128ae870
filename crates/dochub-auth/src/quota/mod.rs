//! Usage quota enforcement.

pub mod enforcer;

pub use enforcer::QuotaEnforcer;

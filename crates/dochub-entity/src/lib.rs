//! # dochub-entity
//!
//! Domain entities for DocHub: account and document models, the role
//! ladder, usage counter kinds, and the account store contract consumed
//! by the quota core.

pub mod account;
pub mod document;

pub use account::{Account, AccountStore, CounterAdjust, CounterKind, Role};
pub use document::Document;

//! Premium subscription state.

pub mod manager;

pub use manager::{SubscriptionManager, SubscriptionState};

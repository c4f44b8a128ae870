//! Session token issuance and verification.

pub mod claims;
pub mod error;
pub mod service;

pub use claims::Claims;
pub use error::TokenError;
pub use service::{IssuedToken, TokenService};

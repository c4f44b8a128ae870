//! Token verification failure modes.

use thiserror::Error;

use dochub_core::AppError;

/// Why a presented token was rejected.
///
/// `Expired` is only reported for tokens whose signature checked out;
/// a tampered token fails as `InvalidSignature` (or `Malformed` if it
/// no longer parses) regardless of its embedded expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token could not be parsed at all.
    #[error("malformed session token")]
    Malformed,
    /// The signature did not verify against the server secret.
    #[error("invalid session token signature")]
    InvalidSignature,
    /// The signature verified but the token is past its expiry.
    #[error("session token has expired")]
    Expired,
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        AppError::authentication(e.to_string())
    }
}

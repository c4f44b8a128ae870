//! Argon2id password hashing and verification.
//!
//! Hashing cost is intentional (it mitigates offline brute force) and
//! must not be lowered for throughput. The work is CPU-bound and safe to
//! run on blocking worker threads in parallel.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use dochub_core::config::auth::AuthConfig;
use dochub_core::error::AppError;

/// Default cost factor (log2 of the memory cost in KiB).
const DEFAULT_COST_FACTOR: u32 = 12;
/// Lowest accepted cost factor (16 KiB).
const MIN_COST_FACTOR: u32 = 4;
/// Highest accepted cost factor (256 MiB).
const MAX_COST_FACTOR: u32 = 18;
/// Number of hashing iterations.
const TIME_COST: u32 = 3;
/// Degree of parallelism.
const PARALLELISM: u32 = 1;

/// Handles password hashing and verification using Argon2id.
#[derive(Clone)]
pub struct PasswordHasher {
    /// Hasher configured with the tuned cost parameters.
    argon2: Argon2<'static>,
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("params", self.argon2.params())
            .finish()
    }
}

impl PasswordHasher {
    /// Create a hasher with the given cost factor.
    ///
    /// The factor is the log2 of the Argon2 memory cost in KiB and is
    /// clamped to a sane range.
    pub fn new(cost_factor: u32) -> Self {
        let cost = cost_factor.clamp(MIN_COST_FACTOR, MAX_COST_FACTOR);
        let params = Params::new(1u32 << cost, TIME_COST, PARALLELISM, None)
            .unwrap_or_else(|_| Params::default());
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    /// Create a hasher from auth configuration.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.hash_cost_factor)
    }

    /// Hash a plaintext password with a freshly generated random salt.
    ///
    /// Two calls with the same input produce different digests.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verify a plaintext password against a stored digest.
    ///
    /// Recomputes using the salt and parameters embedded in `digest`;
    /// the underlying comparison is constant-time. A malformed digest is
    /// treated as a mismatch, never an error.
    pub fn verify_password(&self, password: &str, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            return false;
        };
        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST_FACTOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Low cost keeps the test suite fast.
    fn hasher() -> PasswordHasher {
        PasswordHasher::new(MIN_COST_FACTOR)
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let digest = hasher.hash_password("hunter2").unwrap();

        assert!(hasher.verify_password("hunter2", &digest));
        assert!(!hasher.verify_password("hunter3", &digest));
    }

    #[test]
    fn test_unique_salt_per_hash() {
        let hasher = hasher();
        let a = hasher.hash_password("same-input").unwrap();
        let b = hasher.hash_password("same-input").unwrap();
        assert_ne!(a, b);
        assert!(hasher.verify_password("same-input", &a));
        assert!(hasher.verify_password("same-input", &b));
    }

    #[test]
    fn test_malformed_digest_is_mismatch() {
        let hasher = hasher();
        assert!(!hasher.verify_password("anything", "not-a-digest"));
        assert!(!hasher.verify_password("anything", ""));
    }

    #[test]
    fn test_cost_factor_clamped() {
        // Out-of-range factors must still produce a working hasher.
        let hasher = PasswordHasher::new(99);
        let digest = PasswordHasher::new(0).hash_password("pw").unwrap();
        assert!(hasher.verify_password("pw", &digest));
    }
}

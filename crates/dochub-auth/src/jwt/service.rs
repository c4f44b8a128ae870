//! Session token creation and validation with configurable signing and TTL.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind as JwtErrorKind,
};

use dochub_core::config::auth::AuthConfig;
use dochub_core::error::AppError;
use dochub_core::types::AccountId;

use super::claims::Claims;
use super::error::TokenError;

/// Clock-skew leeway applied during expiry validation, in seconds.
const VALIDATION_LEEWAY_SECONDS: u64 = 5;

/// A freshly issued session token.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IssuedToken {
    /// The signed bearer string.
    pub token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies signed, self-contained session tokens.
///
/// Both operations are pure functions of their input and the clock; the
/// service holds no mutable state and is safe for unlimited parallelism.
#[derive(Clone)]
pub struct TokenService {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
    /// Default token TTL.
    ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenService {
    /// Create a new token service from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = VALIDATION_LEEWAY_SECONDS;

        Self {
            encoding_key: EncodingKey::from_secret(config.secret_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret_key.as_bytes()),
            validation,
            ttl: Duration::minutes(config.token_ttl_minutes as i64),
        }
    }

    /// Issue a token for the given account with the configured TTL.
    pub fn issue(&self, account_id: AccountId, username: &str) -> Result<IssuedToken, AppError> {
        self.issue_with_ttl(account_id, username, self.ttl)
    }

    /// Issue a token with an explicit TTL window anchored at the current time.
    pub fn issue_with_ttl(
        &self,
        account_id: AccountId,
        username: &str,
        ttl: Duration,
    ) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let expires_at = now + ttl;

        let claims = Claims {
            sub: username.to_string(),
            user_id: account_id.into_inner(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify a token string and return its claims.
    ///
    /// The signature is always checked before any claim is trusted; an
    /// unverified payload is never partially honored.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                JwtErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })
    }

    /// Re-issue a token for the same subject with a fresh TTL window
    /// anchored at the current time.
    ///
    /// The caller is expected to have verified the presented token
    /// immediately before calling this.
    pub fn refresh(&self, claims: &Claims) -> Result<IssuedToken, AppError> {
        self.issue(claims.account_id(), claims.username())
    }

    /// Return the configured default TTL.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(&AuthConfig {
            secret_key: "test-secret".into(),
            token_ttl_minutes: 30,
            hash_cost_factor: 12,
        })
    }

    #[test]
    fn test_issue_then_verify_roundtrip() {
        let svc = service();
        let issued = svc.issue(AccountId::from_raw(7), "alice").unwrap();

        let claims = svc.verify(&issued.token).unwrap();
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp, issued.expires_at.timestamp());
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_reports_expired() {
        let svc = service();
        let issued = svc
            .issue_with_ttl(AccountId::from_raw(1), "bob", Duration::minutes(-5))
            .unwrap();

        assert_eq!(svc.verify(&issued.token), Err(TokenError::Expired));
    }

    #[test]
    fn test_wrong_secret_reports_invalid_signature() {
        let svc = service();
        let other = TokenService::new(&AuthConfig {
            secret_key: "different-secret".into(),
            token_ttl_minutes: 30,
            hash_cost_factor: 12,
        });

        let issued = svc.issue(AccountId::from_raw(1), "carol").unwrap();
        assert_eq!(
            other.verify(&issued.token),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_tampered_token_never_verifies() {
        let svc = service();
        let issued = svc.issue(AccountId::from_raw(1), "dave").unwrap();

        // Flip one character in each segment of the token in turn.
        for pos in [2usize, issued.token.len() / 2, issued.token.len() - 2] {
            let mut bytes = issued.token.clone().into_bytes();
            bytes[pos] = if bytes[pos] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();
            if tampered == issued.token {
                continue;
            }

            let result = svc.verify(&tampered);
            assert!(
                matches!(
                    result,
                    Err(TokenError::InvalidSignature) | Err(TokenError::Malformed)
                ),
                "tampered token at byte {pos} verified: {result:?}"
            );
        }
    }

    #[test]
    fn test_garbage_is_malformed() {
        let svc = service();
        assert_eq!(svc.verify("not-a-token"), Err(TokenError::Malformed));
        assert_eq!(svc.verify(""), Err(TokenError::Malformed));
    }

    #[test]
    fn test_refresh_anchors_new_window() {
        let svc = service();
        let issued = svc
            .issue_with_ttl(AccountId::from_raw(9), "erin", Duration::minutes(1))
            .unwrap();
        let claims = svc.verify(&issued.token).unwrap();

        let refreshed = svc.refresh(&claims).unwrap();
        let new_claims = svc.verify(&refreshed.token).unwrap();

        assert_eq!(new_claims.user_id, 9);
        assert_eq!(new_claims.sub, "erin");
        assert!(new_claims.exp >= claims.exp);
    }
}

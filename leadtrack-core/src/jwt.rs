//! Bearer token signing and verification
//!
//! HS256 tokens with a single shared secret. The subject claim carries the
//! login name; there is no refresh, revocation, or session store.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// JWT claims embedded in issued tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's login name
    pub sub: String,
    /// Issued-at, unix seconds
    pub iat: i64,
    /// Expiry, unix seconds
    pub exp: i64,
}

impl Claims {
    /// Claims for `username`, expiring `ttl` from now.
    pub fn new(username: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: username.into(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Signing and verification keys derived from the shared secret
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenKeys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::default(),
        }
    }

    /// Sign claims into a compact token string.
    pub fn sign(&self, claims: &Claims) -> Result<String> {
        encode(&Header::default(), claims, &self.encoding)
            .map_err(|source| CoreError::TokenSign { source })
    }

    /// Verify a token's signature and expiry, returning its claims.
    ///
    /// All failure modes (bad signature, garbage input, expiry) collapse to
    /// `CoreError::TokenInvalid`; callers map that to 403.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| CoreError::TokenInvalid)
    }
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material
        f.debug_struct("TokenKeys").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_verify_roundtrip() {
        let keys = TokenKeys::new(b"test-secret");
        let claims = Claims::new("ramesh", Duration::hours(10));

        let token = keys.sign(&claims).unwrap();
        let decoded = keys.verify(&token).unwrap();

        assert_eq!(decoded.sub, "ramesh");
        assert_eq!(decoded.exp, claims.exp);
        assert!(!decoded.is_expired());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let keys = TokenKeys::new(b"test-secret");
        let other = TokenKeys::new(b"other-secret");
        let token = keys.sign(&Claims::new("ramesh", Duration::hours(1))).unwrap();

        assert!(matches!(other.verify(&token), Err(CoreError::TokenInvalid)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = TokenKeys::new(b"test-secret");
        // Well past the default validation leeway
        let token = keys.sign(&Claims::new("ramesh", Duration::hours(-2))).unwrap();

        assert!(matches!(keys.verify(&token), Err(CoreError::TokenInvalid)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let keys = TokenKeys::new(b"test-secret");
        assert!(matches!(
            keys.verify("not-a-token"),
            Err(CoreError::TokenInvalid)
        ));
    }
}

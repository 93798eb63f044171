//! Password hashing with argon2id
//!
//! Hashes are stored as PHC strings, so parameters and salt travel with the
//! hash and verification needs no extra configuration.

use std::sync::LazyLock;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::RngCore;

use crate::error::{CoreError, Result};

static CONTEXT: LazyLock<Argon2<'static>> = LazyLock::new(|| {
    Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        argon2::Params::DEFAULT,
    )
});

/// Hash a password into a PHC string.
pub fn hash(password: &str) -> Result<String> {
    let mut salt_bytes = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|_| CoreError::PasswordHash)?;

    CONTEXT
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| CoreError::PasswordHash)
}

/// Verify a password against a stored PHC string.
///
/// Returns `Ok(false)` on mismatch; errors only when the stored hash itself
/// cannot be parsed.
pub fn verify(password: &str, stored: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored).map_err(|_| CoreError::MalformedPasswordHash)?;

    match CONTEXT.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(_) => Err(CoreError::MalformedPasswordHash),
    }
}

//! Password hashing via bcrypt.

use tracing::debug;

use super::AuthError;

/// Default bcrypt cost factor.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Cost factors bcrypt accepts.
pub const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// Hash a password with bcrypt at the default cost.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    hash_password_with_cost(password, DEFAULT_BCRYPT_COST)
}

/// Hash a password with bcrypt at an explicit cost (4..=31).
///
/// A fresh random salt is drawn on every call, so hashing the same password
/// twice yields two different strings that both verify.
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AuthError> {
    bcrypt::hash(password, cost).map_err(|e| AuthError::Internal(format!("bcrypt hash: {e}")))
}

/// Verify a password against a bcrypt hash.
///
/// A malformed hash is reported as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            debug!("bcrypt verify rejected stored hash: {e}");
            false
        }
    }
}

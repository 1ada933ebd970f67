//! Password hashing and verification.
//!
//! bcrypt with the default cost and a per-hash random salt. The plaintext
//! never leaves this module's arguments; only the PHC-format hash string is
//! stored.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::errors::ServiceError;

pub fn hash_password(password: &str) -> Result<String, ServiceError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| ServiceError::Internal(format!("Failed to hash password: {}", e)))
}

/// True if the plaintext matches the stored hash. A malformed stored hash
/// counts as a mismatch rather than an error - login must not behave
/// differently for a corrupt record than for a wrong password.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    verify(password, stored_hash).unwrap_or(false)
}

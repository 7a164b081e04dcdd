//! Salted bcrypt password hashing.
//!
//! Hashing is deliberately slow; async callers should run it on
//! `tokio::task::spawn_blocking`.

use crate::AuthError;

pub use bcrypt::DEFAULT_COST;

/// Hash a plaintext password with [`DEFAULT_COST`].
pub fn hash_password(plaintext: &str) -> Result<String, AuthError> {
    hash_password_with_cost(plaintext, DEFAULT_COST)
}

/// Hash a plaintext password with an explicit bcrypt cost (4..=31).
pub fn hash_password_with_cost(plaintext: &str, cost: u32) -> Result<String, AuthError> {
    Ok(bcrypt::hash(plaintext, cost)?)
}

/// Check a plaintext password against a stored hash.
///
/// A malformed stored hash never verifies.
pub fn verify_password(plaintext: &str, hash: &str) -> bool {
    bcrypt::verify(plaintext, hash).unwrap_or(false)
}

//! Authentication primitives shared by CMS services.
//!
//! Provides bcrypt password hashing, JWT bearer-token issue/resolve, and
//! `Authorization: Bearer` header parsing.

pub mod bearer;
pub mod password;
pub mod token;

/// Errors returned by the token and password helpers.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("token has no subject")]
    MissingSubject,
    #[error("malformed token")]
    Malformed,
    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
    #[error("failed to hash password")]
    Hashing(#[from] bcrypt::BcryptError),
}

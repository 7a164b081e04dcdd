//! JWT bearer tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::AuthError;

/// Access-token lifetime used when the caller does not configure one.
pub const DEFAULT_ACCESS_TOKEN_TTL: Duration = Duration::minutes(30);

/// JWT claims payload.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | username |
/// | `exp` | `exp` | expiry, seconds since UNIX epoch |
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub exp: u64,
}

/// Claims as read back from an untrusted token. `sub` stays optional so an
/// absent subject is reported as such rather than as a decode failure.
#[derive(Deserialize)]
struct IncomingClaims {
    sub: Option<String>,
}

/// A freshly signed token and its expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub exp: u64,
}

/// Sign a token for `username` valid for `ttl` from now.
///
/// A non-positive `ttl` yields a token that is already expired.
pub fn issue_token(username: &str, ttl: Duration, secret: &str) -> Result<IssuedToken, AuthError> {
    let exp = (Utc::now() + ttl).timestamp().max(0) as u64;
    let claims = JwtClaims {
        sub: username.to_owned(),
        exp,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(AuthError::Signing)?;
    Ok(IssuedToken { token, exp })
}

/// Verify signature and expiry, returning the subject username.
///
/// Validation: HS256, `exp` required, no leeway. A missing or empty `sub`
/// is `MissingSubject`.
pub fn resolve_token(token: &str, secret: &str) -> Result<String, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);

    let data = decode::<IncomingClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    data.claims
        .sub
        .filter(|sub| !sub.is_empty())
        .ok_or(AuthError::MissingSubject)
}

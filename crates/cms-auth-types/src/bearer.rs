//! `Authorization: Bearer <token>` parsing.

use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use http::HeaderMap;

/// Value of the `WWW-Authenticate` header sent with 401 responses.
pub const WWW_AUTHENTICATE_BEARER: &str = "Bearer";

/// Extract the bearer token from request headers.
///
/// Returns `None` when the header is absent, uses another scheme, or carries an
/// empty token.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_owned())
        .filter(|token| !token.is_empty())
}

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON error payload returned by every service endpoint.
///
/// `kind` is a stable SCREAMING_SNAKE identifier for programmatic handling;
/// `message` is the human-readable description.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub kind: &'a str,
    pub message: String,
}

/// Build an error response with the shared JSON body.
pub fn error_response(status: StatusCode, kind: &str, message: String) -> Response {
    (status, Json(ErrorBody { kind, message })).into_response()
}

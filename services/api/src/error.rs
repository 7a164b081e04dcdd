use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection};
use axum::http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE};
use axum::response::{IntoResponse, Response};

use cms_auth_types::bearer::WWW_AUTHENTICATE_BEARER;
use cms_core::error::error_response;
use cms_domain::id::{PlayerId, TeamId};

/// API service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("could not validate credentials")]
    InvalidToken,
    #[error("incorrect username or password")]
    InvalidCredentials,
    #[error("admin permissions are required for this operation")]
    Forbidden,
    #[error("user {0} already exists")]
    UserAlreadyExists(String),
    #[error("player {0} already exists")]
    PlayerAlreadyExists(String),
    #[error("player with minecraft UUID {0} already exists")]
    McUuidTaken(String),
    #[error("team {name} with alias {alias} already exists")]
    TeamAlreadyExists { name: String, alias: String },
    #[error("record already exists")]
    DuplicateRecord,
    #[error("could not find player with ID {0}")]
    PlayerNotFound(PlayerId),
    #[error("could not find player with ID {0}")]
    UnknownPlayerId(String),
    #[error("could not find player with username {0}")]
    PlayerUsernameNotFound(String),
    #[error("could not find team with ID {0}")]
    TeamNotFound(TeamId),
    #[error("could not find team with ID {0}")]
    UnknownTeamId(String),
    #[error("could not find team with alias {0}")]
    TeamAliasNotFound(String),
    #[error("minecraft UUID for player {0} does not exist")]
    McAccountNotFound(String),
    #[error("could not find minecraft account with UUID {0}")]
    McUuidNotFound(String),
    #[error("{0}")]
    InvalidRequest(String),
    #[error("record store unavailable")]
    Unavailable,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::UserAlreadyExists(_) => "USER_ALREADY_EXISTS",
            Self::PlayerAlreadyExists(_) => "PLAYER_ALREADY_EXISTS",
            Self::McUuidTaken(_) => "MC_UUID_TAKEN",
            Self::TeamAlreadyExists { .. } => "TEAM_ALREADY_EXISTS",
            Self::DuplicateRecord => "DUPLICATE_RECORD",
            Self::PlayerNotFound(_)
            | Self::UnknownPlayerId(_)
            | Self::PlayerUsernameNotFound(_) => "PLAYER_NOT_FOUND",
            Self::TeamNotFound(_) | Self::UnknownTeamId(_) | Self::TeamAliasNotFound(_) => {
                "TEAM_NOT_FOUND"
            }
            Self::McAccountNotFound(_) | Self::McUuidNotFound(_) => "MC_ACCOUNT_NOT_FOUND",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::Unavailable => "UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidToken | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserAlreadyExists(_)
            | Self::PlayerAlreadyExists(_)
            | Self::McUuidTaken(_)
            | Self::TeamAlreadyExists { .. }
            | Self::DuplicateRecord => StatusCode::CONFLICT,
            Self::PlayerNotFound(_)
            | Self::UnknownPlayerId(_)
            | Self::PlayerUsernameNotFound(_)
            | Self::TeamNotFound(_)
            | Self::UnknownTeamId(_)
            | Self::TeamAliasNotFound(_)
            | Self::McAccountNotFound(_)
            | Self::McUuidNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Extractor rejections are answered in the same `{kind, message}` shape as
// every other error.

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // 4xx are expected client errors and already recorded by TraceLayer.
        match &self {
            Self::Internal(e) => tracing::error!(error = ?e, kind = "INTERNAL", "internal error"),
            Self::Unavailable => tracing::warn!(kind = "UNAVAILABLE", "record store unavailable"),
            _ => {}
        }
        let mut response = error_response(status, self.kind(), self.to_string());
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                WWW_AUTHENTICATE,
                HeaderValue::from_static(WWW_AUTHENTICATE_BEARER),
            );
        }
        response
    }
}

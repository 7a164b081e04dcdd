//! Request extractors: bearer-token authentication, record ids in the path,
//! and JSON/form bodies whose rejections render as `ApiError`.

use axum::extract::{FromRequest, FromRequestParts, Path};
use axum::http::request::Parts;

use cms_auth_types::bearer::bearer_token;
use cms_domain::id::{PlayerId, TeamId};

use crate::domain::types::User;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::auth::GetCurrentUserUseCase;

/// The account behind the request's `Authorization: Bearer` token.
///
/// Rejects with 401 when the header is missing or malformed, the token fails
/// verification, or the subject no longer exists.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    // Pull owned values out of `parts`/`state` first so the returned future
    // borrows neither.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = bearer_token(&parts.headers);
        let usecase = GetCurrentUserUseCase {
            repo: state.user_repo(),
            jwt_secret: state.auth.jwt_secret.clone(),
        };

        async move {
            let token = token.ok_or(ApiError::InvalidToken)?;
            let user = usecase.execute(&token).await?;
            Ok(Self(user))
        }
    }
}

// ── Bodies ───────────────────────────────────────────────────────────────────

/// `axum::Json` with rejections rendered as `ApiError::InvalidRequest`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// `axum::Form` with rejections rendered as `ApiError::InvalidRequest`.
#[derive(FromRequest)]
#[from_request(via(axum::Form), rejection(ApiError))]
pub struct FormBody<T>(pub T);

// ── Path segments ────────────────────────────────────────────────────────────

/// A free-text path segment such as a username or alias.
#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct PathParam<T>(pub T);

/// The `{id}` segment of a player route. A segment that is not a player id
/// names no player and is rejected as not found.
pub struct PlayerIdPath(pub PlayerId);

impl<S: Send + Sync> FromRequestParts<S> for PlayerIdPath {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        parse_player_id(raw).map(Self)
    }
}

/// The `{id}` segment of a team route, rejected as not found when malformed.
pub struct TeamIdPath(pub TeamId);

impl<S: Send + Sync> FromRequestParts<S> for TeamIdPath {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        parse_team_id(raw).map(Self)
    }
}

/// `/teams/{id}/players/{player_id}`.
pub struct RosterPath {
    pub team: TeamId,
    pub player: PlayerId,
}

impl<S: Send + Sync> FromRequestParts<S> for RosterPath {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((team, player)) =
            Path::<(String, String)>::from_request_parts(parts, state).await?;
        Ok(Self {
            team: parse_team_id(team)?,
            player: parse_player_id(player)?,
        })
    }
}

fn parse_player_id(raw: String) -> Result<PlayerId, ApiError> {
    raw.parse().map_err(|_| ApiError::UnknownPlayerId(raw))
}

fn parse_team_id(raw: String) -> Result<TeamId, ApiError> {
    raw.parse().map_err(|_| ApiError::UnknownTeamId(raw))
}

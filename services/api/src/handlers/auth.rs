use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use cms_domain::id::{PlayerId, UserId};

use crate::domain::types::User;
use crate::error::ApiError;
use crate::extract::{CurrentUser, FormBody, JsonBody};
use crate::state::AppState;
use crate::usecase::auth::{CreateUserInput, CreateUserUseCase, LoginUseCase};

#[derive(Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub is_admin: bool,
    pub player: Option<PlayerId>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            is_admin: user.is_admin,
            player: user.player,
        }
    }
}

// ── POST /oauth2/token ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

pub async fn login(
    State(state): State<AppState>,
    FormBody(form): FormBody<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let usecase = LoginUseCase {
        repo: state.user_repo(),
        auth: state.auth.clone(),
    };
    let issued = usecase.execute(&form.username, form.password).await?;
    Ok(Json(TokenResponse {
        access_token: issued.token,
        token_type: "bearer",
    }))
}

// ── GET /oauth2/users/me ─────────────────────────────────────────────────────

pub async fn get_me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}

// ── POST /oauth2/users ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
    pub player: Option<PlayerId>,
}

pub async fn create_user(
    CurrentUser(actor): CurrentUser,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let usecase = CreateUserUseCase {
        users: state.user_repo(),
        players: state.player_repo(),
        password_cost: state.auth.password_cost,
    };
    let user = usecase
        .execute(
            &actor,
            CreateUserInput {
                username: body.username,
                password: body.password,
                is_admin: body.is_admin,
                player: body.player,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

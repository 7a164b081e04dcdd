use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use cms_domain::id::PlayerId;

use crate::domain::types::Player;
use crate::error::ApiError;
use crate::extract::{CurrentUser, JsonBody, PathParam, PlayerIdPath};
use crate::state::AppState;
use crate::usecase::player::{
    CreatePlayerUseCase, DeletePlayerUseCase, GetPlayerByUsernameUseCase, GetPlayerUseCase,
    ListPlayersUseCase, UpdatePlayerInput, UpdatePlayerUseCase,
};

#[derive(Serialize)]
pub struct PlayerResponse {
    pub id: PlayerId,
    pub mc_username: String,
    pub mc_uuid: String,
    pub badges: Vec<i32>,
}

impl From<Player> for PlayerResponse {
    fn from(player: Player) -> Self {
        Self {
            id: player.id,
            mc_username: player.mc_username,
            mc_uuid: player.mc_uuid,
            badges: player.badges,
        }
    }
}

// ── GET /players ─────────────────────────────────────────────────────────────

pub async fn list_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlayerResponse>>, ApiError> {
    let usecase = ListPlayersUseCase {
        repo: state.player_repo(),
    };
    let players = usecase.execute().await?;
    Ok(Json(players.into_iter().map(Into::into).collect()))
}

// ── POST /players ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreatePlayerRequest {
    pub mc_username: String,
}

pub async fn create_player(
    _user: CurrentUser,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreatePlayerRequest>,
) -> Result<(StatusCode, Json<PlayerResponse>), ApiError> {
    let usecase = CreatePlayerUseCase {
        repo: state.player_repo(),
        resolver: state.resolver.clone(),
    };
    let player = usecase.execute(body.mc_username).await?;
    Ok((StatusCode::CREATED, Json(player.into())))
}

// ── GET /players/id/{id} ─────────────────────────────────────────────────────

pub async fn get_player(
    State(state): State<AppState>,
    PlayerIdPath(id): PlayerIdPath,
) -> Result<Json<PlayerResponse>, ApiError> {
    let usecase = GetPlayerUseCase {
        repo: state.player_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── GET /players/mc_username/{mc_username} ───────────────────────────────────

pub async fn get_player_by_username(
    State(state): State<AppState>,
    PathParam(mc_username): PathParam<String>,
) -> Result<Json<PlayerResponse>, ApiError> {
    let usecase = GetPlayerByUsernameUseCase {
        repo: state.player_repo(),
    };
    Ok(Json(usecase.execute(&mc_username).await?.into()))
}

// ── PUT /players/{id} ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdatePlayerRequest {
    pub mc_username: Option<String>,
    pub mc_uuid: Option<String>,
    pub badges: Option<Vec<i32>>,
}

pub async fn update_player(
    _user: CurrentUser,
    State(state): State<AppState>,
    PlayerIdPath(id): PlayerIdPath,
    JsonBody(body): JsonBody<UpdatePlayerRequest>,
) -> Result<Json<PlayerResponse>, ApiError> {
    let usecase = UpdatePlayerUseCase {
        repo: state.player_repo(),
        resolver: state.resolver.clone(),
    };
    let player = usecase
        .execute(
            id,
            UpdatePlayerInput {
                mc_username: body.mc_username,
                mc_uuid: body.mc_uuid,
                badges: body.badges,
            },
        )
        .await?;
    Ok(Json(player.into()))
}

// ── DELETE /players/{id} ─────────────────────────────────────────────────────

pub async fn delete_player(
    _user: CurrentUser,
    State(state): State<AppState>,
    PlayerIdPath(id): PlayerIdPath,
) -> Result<StatusCode, ApiError> {
    let usecase = DeletePlayerUseCase {
        repo: state.player_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

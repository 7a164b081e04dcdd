use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use cms_domain::id::{PlayerId, TeamId, UserId};

use crate::domain::types::Team;
use crate::error::ApiError;
use crate::extract::{CurrentUser, JsonBody, PathParam, RosterPath, TeamIdPath};
use crate::handlers::player::PlayerResponse;
use crate::state::AppState;
use crate::usecase::team::{
    AddRosterPlayerUseCase, CreateTeamInput, CreateTeamUseCase, DeleteTeamUseCase,
    GetRosterUseCase, GetTeamByAliasUseCase, GetTeamUseCase, ListTeamsUseCase,
    RemoveRosterPlayerUseCase, UpdateTeamInput, UpdateTeamUseCase,
};

#[derive(Serialize)]
pub struct TeamResponse {
    pub id: TeamId,
    pub name: String,
    pub alias: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub is_active: bool,
    pub managers: Vec<UserId>,
    pub players: Vec<PlayerId>,
    pub badges: Vec<i32>,
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            id: team.id,
            name: team.name,
            alias: team.alias,
            description: team.description,
            logo_url: team.logo_url,
            is_active: team.is_active,
            managers: team.managers,
            players: team.players,
            badges: team.badges,
        }
    }
}

// ── GET /teams ───────────────────────────────────────────────────────────────

pub async fn list_teams(State(state): State<AppState>) -> Result<Json<Vec<TeamResponse>>, ApiError> {
    let usecase = ListTeamsUseCase {
        repo: state.team_repo(),
    };
    let teams = usecase.execute().await?;
    Ok(Json(teams.into_iter().map(Into::into).collect()))
}

// ── POST /teams ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
    pub alias: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}

pub async fn create_team(
    _user: CurrentUser,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateTeamRequest>,
) -> Result<(StatusCode, Json<TeamResponse>), ApiError> {
    let usecase = CreateTeamUseCase {
        repo: state.team_repo(),
    };
    let team = usecase
        .execute(CreateTeamInput {
            name: body.name,
            alias: body.alias,
            description: body.description,
            logo_url: body.logo_url,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(team.into())))
}

// ── GET /teams/id/{id} ───────────────────────────────────────────────────────

pub async fn get_team(
    State(state): State<AppState>,
    TeamIdPath(id): TeamIdPath,
) -> Result<Json<TeamResponse>, ApiError> {
    let usecase = GetTeamUseCase {
        repo: state.team_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── GET /teams/alias/{alias} ─────────────────────────────────────────────────

pub async fn get_team_by_alias(
    State(state): State<AppState>,
    PathParam(alias): PathParam<String>,
) -> Result<Json<TeamResponse>, ApiError> {
    let usecase = GetTeamByAliasUseCase {
        repo: state.team_repo(),
    };
    Ok(Json(usecase.execute(&alias).await?.into()))
}

// ── PUT /teams/{id} ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateTeamRequest {
    pub name: Option<String>,
    pub alias: Option<String>,
    #[serde(default, deserialize_with = "cms_core::serde::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "cms_core::serde::double_option")]
    pub logo_url: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub managers: Option<Vec<UserId>>,
    pub players: Option<Vec<PlayerId>>,
    pub badges: Option<Vec<i32>>,
}

pub async fn update_team(
    _user: CurrentUser,
    State(state): State<AppState>,
    TeamIdPath(id): TeamIdPath,
    JsonBody(body): JsonBody<UpdateTeamRequest>,
) -> Result<Json<TeamResponse>, ApiError> {
    let usecase = UpdateTeamUseCase {
        repo: state.team_repo(),
    };
    let team = usecase
        .execute(
            id,
            UpdateTeamInput {
                name: body.name,
                alias: body.alias,
                description: body.description,
                logo_url: body.logo_url,
                is_active: body.is_active,
                managers: body.managers,
                players: body.players,
                badges: body.badges,
            },
        )
        .await?;
    Ok(Json(team.into()))
}

// ── DELETE /teams/{id} ───────────────────────────────────────────────────────

pub async fn delete_team(
    _user: CurrentUser,
    State(state): State<AppState>,
    TeamIdPath(id): TeamIdPath,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteTeamUseCase {
        repo: state.team_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /teams/{id}/players ──────────────────────────────────────────────────

pub async fn get_roster(
    State(state): State<AppState>,
    TeamIdPath(id): TeamIdPath,
) -> Result<Json<Vec<PlayerResponse>>, ApiError> {
    let usecase = GetRosterUseCase {
        teams: state.team_repo(),
        players: state.player_repo(),
    };
    let roster = usecase.execute(id).await?;
    Ok(Json(roster.into_iter().map(Into::into).collect()))
}

// ── PUT /teams/{id}/players/{player_id} ──────────────────────────────────────

pub async fn add_roster_player(
    _user: CurrentUser,
    State(state): State<AppState>,
    RosterPath { team: id, player: player_id }: RosterPath,
) -> Result<Json<TeamResponse>, ApiError> {
    let usecase = AddRosterPlayerUseCase {
        teams: state.team_repo(),
        players: state.player_repo(),
    };
    Ok(Json(usecase.execute(id, player_id).await?.into()))
}

// ── DELETE /teams/{id}/players/{player_id} ───────────────────────────────────

pub async fn remove_roster_player(
    _user: CurrentUser,
    State(state): State<AppState>,
    RosterPath { team: id, player: player_id }: RosterPath,
) -> Result<Json<TeamResponse>, ApiError> {
    let usecase = RemoveRosterPlayerUseCase {
        teams: state.team_repo(),
    };
    Ok(Json(usecase.execute(id, player_id).await?.into()))
}

use std::collections::HashMap;

use cms_domain::id::{PlayerId, TeamId, UserId};

use crate::domain::repository::{PlayerRepository, TeamRepository};
use crate::domain::types::{Player, Team, TeamChanges, dedup_preserving_order};
use crate::error::ApiError;

async fn load_team<R: TeamRepository>(repo: &R, id: TeamId) -> Result<Team, ApiError> {
    repo.find_by_id(id).await?.ok_or(ApiError::TeamNotFound(id))
}

// ── ListTeams ────────────────────────────────────────────────────────────────

pub struct ListTeamsUseCase<R: TeamRepository> {
    pub repo: R,
}

impl<R: TeamRepository> ListTeamsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Team>, ApiError> {
        self.repo.list().await
    }
}

// ── GetTeam ──────────────────────────────────────────────────────────────────

pub struct GetTeamUseCase<R: TeamRepository> {
    pub repo: R,
}

impl<R: TeamRepository> GetTeamUseCase<R> {
    pub async fn execute(&self, id: TeamId) -> Result<Team, ApiError> {
        load_team(&self.repo, id).await
    }
}

pub struct GetTeamByAliasUseCase<R: TeamRepository> {
    pub repo: R,
}

impl<R: TeamRepository> GetTeamByAliasUseCase<R> {
    pub async fn execute(&self, alias: &str) -> Result<Team, ApiError> {
        self.repo
            .find_by_alias(alias)
            .await?
            .ok_or_else(|| ApiError::TeamAliasNotFound(alias.to_owned()))
    }
}

// ── CreateTeam ───────────────────────────────────────────────────────────────

pub struct CreateTeamInput {
    pub name: String,
    pub alias: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}

pub struct CreateTeamUseCase<R: TeamRepository> {
    pub repo: R,
}

impl<R: TeamRepository> CreateTeamUseCase<R> {
    pub async fn execute(&self, input: CreateTeamInput) -> Result<Team, ApiError> {
        if self
            .repo
            .find_name_or_alias_conflict(Some(&input.name), Some(&input.alias), None)
            .await?
            .is_some()
        {
            return Err(ApiError::TeamAlreadyExists {
                name: input.name,
                alias: input.alias,
            });
        }
        let team = Team {
            id: TeamId::generate(),
            name: input.name,
            alias: input.alias,
            description: input.description,
            logo_url: input.logo_url,
            is_active: true,
            managers: Vec::new(),
            players: Vec::new(),
            badges: Vec::new(),
        };
        self.repo.create(&team).await?;
        tracing::info!(team_id = %team.id, alias = %team.alias, "team created");
        Ok(team)
    }
}

// ── UpdateTeam ───────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct UpdateTeamInput {
    pub name: Option<String>,
    pub alias: Option<String>,
    pub description: Option<Option<String>>,
    pub logo_url: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub managers: Option<Vec<UserId>>,
    pub players: Option<Vec<PlayerId>>,
    pub badges: Option<Vec<i32>>,
}

pub struct UpdateTeamUseCase<R: TeamRepository> {
    pub repo: R,
}

impl<R: TeamRepository> UpdateTeamUseCase<R> {
    pub async fn execute(&self, id: TeamId, input: UpdateTeamInput) -> Result<Team, ApiError> {
        let current = load_team(&self.repo, id).await?;

        if input.name.is_some() || input.alias.is_some() {
            let conflict = self
                .repo
                .find_name_or_alias_conflict(input.name.as_deref(), input.alias.as_deref(), Some(id))
                .await?;
            if conflict.is_some() {
                return Err(ApiError::TeamAlreadyExists {
                    name: input.name.unwrap_or(current.name),
                    alias: input.alias.unwrap_or(current.alias),
                });
            }
        }

        let changes = TeamChanges {
            name: input.name,
            alias: input.alias,
            description: input.description,
            logo_url: input.logo_url,
            is_active: input.is_active,
            managers: input.managers.as_deref().map(dedup_preserving_order),
            players: input.players.as_deref().map(dedup_preserving_order),
            badges: input.badges.as_deref().map(dedup_preserving_order),
        };
        if changes.is_empty() {
            return Ok(current);
        }
        if self.repo.update(id, &changes).await? {
            tracing::info!(team_id = %id, "team updated");
        }
        load_team(&self.repo, id).await
    }
}

// ── DeleteTeam ───────────────────────────────────────────────────────────────

pub struct DeleteTeamUseCase<R: TeamRepository> {
    pub repo: R,
}

impl<R: TeamRepository> DeleteTeamUseCase<R> {
    pub async fn execute(&self, id: TeamId) -> Result<(), ApiError> {
        if !self.repo.delete(id).await? {
            return Err(ApiError::TeamNotFound(id));
        }
        tracing::info!(team_id = %id, "team deleted");
        Ok(())
    }
}

// ── Roster ───────────────────────────────────────────────────────────────────

pub struct GetRosterUseCase<T: TeamRepository, P: PlayerRepository> {
    pub teams: T,
    pub players: P,
}

impl<T: TeamRepository, P: PlayerRepository> GetRosterUseCase<T, P> {
    /// Players on the roster in roster order. Ids with no player record are
    /// skipped.
    pub async fn execute(&self, id: TeamId) -> Result<Vec<Player>, ApiError> {
        let team = load_team(&self.teams, id).await?;
        if team.players.is_empty() {
            return Ok(Vec::new());
        }
        let mut found: HashMap<PlayerId, Player> = self
            .players
            .find_by_ids(&team.players)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();
        Ok(team
            .players
            .iter()
            .filter_map(|pid| found.remove(pid))
            .collect())
    }
}

/// Adds a player to a roster. Re-adding a rostered player is a no-op.
///
/// Read-modify-write: two concurrent edits of the same roster can lose one
/// of the changes.
pub struct AddRosterPlayerUseCase<T: TeamRepository, P: PlayerRepository> {
    pub teams: T,
    pub players: P,
}

impl<T: TeamRepository, P: PlayerRepository> AddRosterPlayerUseCase<T, P> {
    pub async fn execute(&self, id: TeamId, player_id: PlayerId) -> Result<Team, ApiError> {
        let team = load_team(&self.teams, id).await?;
        if self.players.find_by_id(player_id).await?.is_none() {
            return Err(ApiError::PlayerNotFound(player_id));
        }
        if team.players.contains(&player_id) {
            return Ok(team);
        }
        let mut roster = team.players;
        roster.push(player_id);
        let changes = TeamChanges {
            players: Some(roster),
            ..Default::default()
        };
        self.teams.update(id, &changes).await?;
        tracing::info!(team_id = %id, player_id = %player_id, "player added to roster");
        load_team(&self.teams, id).await
    }
}

/// Removes a player from a roster. Removing an absent id is a no-op.
pub struct RemoveRosterPlayerUseCase<T: TeamRepository> {
    pub teams: T,
}

impl<T: TeamRepository> RemoveRosterPlayerUseCase<T> {
    pub async fn execute(&self, id: TeamId, player_id: PlayerId) -> Result<Team, ApiError> {
        let team = load_team(&self.teams, id).await?;
        if !team.players.contains(&player_id) {
            return Ok(team);
        }
        let roster: Vec<PlayerId> = team
            .players
            .into_iter()
            .filter(|pid| *pid != player_id)
            .collect();
        let changes = TeamChanges {
            players: Some(roster),
            ..Default::default()
        };
        self.teams.update(id, &changes).await?;
        tracing::info!(team_id = %id, player_id = %player_id, "player removed from roster");
        load_team(&self.teams, id).await
    }
}

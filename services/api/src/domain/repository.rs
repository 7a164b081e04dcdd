#![allow(async_fn_in_trait)]

use cms_domain::id::{PlayerId, TeamId};

use crate::domain::types::{McProfile, Player, PlayerChanges, Team, TeamChanges, User};
use crate::error::ApiError;

/// Repository for login accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError>;
    async fn create(&self, user: &User) -> Result<(), ApiError>;
}

/// Repository for player records.
pub trait PlayerRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Player>, ApiError>;
    async fn find_by_id(&self, id: PlayerId) -> Result<Option<Player>, ApiError>;
    async fn find_by_mc_username(&self, mc_username: &str) -> Result<Option<Player>, ApiError>;
    async fn find_by_mc_uuid(&self, mc_uuid: &str) -> Result<Option<Player>, ApiError>;
    /// Fetch every listed player that exists. Order is unspecified.
    async fn find_by_ids(&self, ids: &[PlayerId]) -> Result<Vec<Player>, ApiError>;
    async fn create(&self, player: &Player) -> Result<(), ApiError>;
    /// Apply `changes`. Returns `false` when no player has `id`.
    async fn update(&self, id: PlayerId, changes: &PlayerChanges) -> Result<bool, ApiError>;
    /// Delete a player and drop it from every team roster. Returns `true` if a
    /// row was deleted.
    async fn delete(&self, id: PlayerId) -> Result<bool, ApiError>;
}

/// Repository for team records.
pub trait TeamRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Team>, ApiError>;
    async fn find_by_id(&self, id: TeamId) -> Result<Option<Team>, ApiError>;
    async fn find_by_alias(&self, alias: &str) -> Result<Option<Team>, ApiError>;
    /// Find a team other than `exclude` whose name equals `name` or whose
    /// alias equals `alias`.
    async fn find_name_or_alias_conflict(
        &self,
        name: Option<&str>,
        alias: Option<&str>,
        exclude: Option<TeamId>,
    ) -> Result<Option<Team>, ApiError>;
    async fn create(&self, team: &Team) -> Result<(), ApiError>;
    /// Apply `changes`. Returns `false` when no team has `id`.
    async fn update(&self, id: TeamId, changes: &TeamChanges) -> Result<bool, ApiError>;
    async fn delete(&self, id: TeamId) -> Result<bool, ApiError>;
}

/// Maps Minecraft usernames to account UUIDs and back.
///
/// Any lookup failure (unknown account, transport error, malformed reply) is
/// reported as `None`.
pub trait IdentityResolver: Send + Sync {
    /// Look up the account behind `mc_username`. The returned profile carries
    /// the name's canonical casing alongside the UUID.
    async fn resolve_uuid(&self, mc_username: &str) -> Option<McProfile>;
    async fn resolve_username(&self, mc_uuid: &str) -> Option<String>;
}

use cms_domain::id::PlayerId;
use cms_domain::minecraft::normalize_mc_uuid;

use crate::domain::repository::{IdentityResolver, PlayerRepository};
use crate::domain::types::{Player, PlayerChanges};
use crate::error::ApiError;

/// Fail with `McUuidTaken` when a player other than `owner` holds `mc_uuid`.
async fn ensure_mc_uuid_free<R: PlayerRepository>(
    repo: &R,
    mc_uuid: &str,
    owner: Option<PlayerId>,
) -> Result<(), ApiError> {
    match repo.find_by_mc_uuid(mc_uuid).await? {
        Some(holder) if Some(holder.id) != owner => Err(ApiError::McUuidTaken(mc_uuid.to_owned())),
        _ => Ok(()),
    }
}

// ── ListPlayers ──────────────────────────────────────────────────────────────

pub struct ListPlayersUseCase<R: PlayerRepository> {
    pub repo: R,
}

impl<R: PlayerRepository> ListPlayersUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Player>, ApiError> {
        self.repo.list().await
    }
}

// ── GetPlayer ────────────────────────────────────────────────────────────────

pub struct GetPlayerUseCase<R: PlayerRepository> {
    pub repo: R,
}

impl<R: PlayerRepository> GetPlayerUseCase<R> {
    pub async fn execute(&self, id: PlayerId) -> Result<Player, ApiError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::PlayerNotFound(id))
    }
}

pub struct GetPlayerByUsernameUseCase<R: PlayerRepository> {
    pub repo: R,
}

impl<R: PlayerRepository> GetPlayerByUsernameUseCase<R> {
    pub async fn execute(&self, mc_username: &str) -> Result<Player, ApiError> {
        self.repo
            .find_by_mc_username(mc_username)
            .await?
            .ok_or_else(|| ApiError::PlayerUsernameNotFound(mc_username.to_owned()))
    }
}

// ── CreatePlayer ─────────────────────────────────────────────────────────────

pub struct CreatePlayerUseCase<R: PlayerRepository, X: IdentityResolver> {
    pub repo: R,
    pub resolver: X,
}

impl<R: PlayerRepository, X: IdentityResolver> CreatePlayerUseCase<R, X> {
    pub async fn execute(&self, mc_username: String) -> Result<Player, ApiError> {
        // Reject before touching the resolver.
        if self.repo.find_by_mc_username(&mc_username).await?.is_some() {
            return Err(ApiError::PlayerAlreadyExists(mc_username));
        }
        let profile = self
            .resolver
            .resolve_uuid(&mc_username)
            .await
            .ok_or(ApiError::McAccountNotFound(mc_username))?;
        ensure_mc_uuid_free(&self.repo, &profile.mc_uuid, None).await?;

        // Stored under the resolver's spelling so later lookups by the
        // canonical name find it.
        let player = Player {
            id: PlayerId::generate(),
            mc_username: profile.mc_username,
            mc_uuid: profile.mc_uuid,
            badges: Vec::new(),
        };
        self.repo.create(&player).await?;
        tracing::info!(player_id = %player.id, mc_uuid = %player.mc_uuid, "player created");
        Ok(player)
    }
}

// ── UpdatePlayer ─────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct UpdatePlayerInput {
    pub mc_username: Option<String>,
    pub mc_uuid: Option<String>,
    pub badges: Option<Vec<i32>>,
}

pub struct UpdatePlayerUseCase<R: PlayerRepository, X: IdentityResolver> {
    pub repo: R,
    pub resolver: X,
}

impl<R: PlayerRepository, X: IdentityResolver> UpdatePlayerUseCase<R, X> {
    /// Apply a partial update, keeping `mc_username` and `mc_uuid` consistent
    /// with the identity resolver.
    ///
    /// A supplied `mc_username` wins: it is resolved to a fresh `mc_uuid` and
    /// stored in its canonical casing, overriding any `mc_uuid` in the same
    /// request. A lone `mc_uuid` is
    /// reverse-resolved to its current username.
    pub async fn execute(&self, id: PlayerId, input: UpdatePlayerInput) -> Result<Player, ApiError> {
        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::PlayerNotFound(id))?;

        let mut changes = PlayerChanges {
            badges: input.badges,
            ..Default::default()
        };

        if let Some(mc_username) = input.mc_username {
            let profile = self
                .resolver
                .resolve_uuid(&mc_username)
                .await
                .ok_or(ApiError::McAccountNotFound(mc_username))?;
            ensure_mc_uuid_free(&self.repo, &profile.mc_uuid, Some(id)).await?;
            changes.mc_username = Some(profile.mc_username);
            changes.mc_uuid = Some(profile.mc_uuid);
        } else if let Some(raw) = input.mc_uuid {
            let mc_uuid = normalize_mc_uuid(&raw).ok_or(ApiError::McUuidNotFound(raw))?;
            ensure_mc_uuid_free(&self.repo, &mc_uuid, Some(id)).await?;
            let mc_username = self
                .resolver
                .resolve_username(&mc_uuid)
                .await
                .ok_or_else(|| ApiError::McUuidNotFound(mc_uuid.clone()))?;
            changes.mc_username = Some(mc_username);
            changes.mc_uuid = Some(mc_uuid);
        }

        if changes.is_empty() {
            return Ok(current);
        }
        if self.repo.update(id, &changes).await? {
            tracing::info!(player_id = %id, "player updated");
        }
        // Also covers a concurrent delete between the read and the write.
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::PlayerNotFound(id))
    }
}

// ── DeletePlayer ─────────────────────────────────────────────────────────────

pub struct DeletePlayerUseCase<R: PlayerRepository> {
    pub repo: R,
}

impl<R: PlayerRepository> DeletePlayerUseCase<R> {
    pub async fn execute(&self, id: PlayerId) -> Result<(), ApiError> {
        if !self.repo.delete(id).await? {
            return Err(ApiError::PlayerNotFound(id));
        }
        tracing::info!(player_id = %id, "player deleted");
        Ok(())
    }
}

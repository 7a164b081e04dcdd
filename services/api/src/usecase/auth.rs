use anyhow::Context as _;

use cms_auth_types::password::{hash_password_with_cost, verify_password};
use cms_auth_types::token::{IssuedToken, issue_token, resolve_token};
use cms_domain::id::{PlayerId, UserId};

use crate::domain::repository::{PlayerRepository, UserRepository};
use crate::domain::types::User;
use crate::error::ApiError;
use crate::state::AuthSettings;

/// bcrypt is CPU-bound; keep it off the async workers.
async fn hash_blocking(password: String, cost: u32) -> Result<String, ApiError> {
    let hashed = tokio::task::spawn_blocking(move || hash_password_with_cost(&password, cost))
        .await
        .context("join password hashing task")?
        .context("hash password")?;
    Ok(hashed)
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginUseCase<R: UserRepository> {
    pub repo: R,
    pub auth: AuthSettings,
}

impl<R: UserRepository> LoginUseCase<R> {
    pub async fn execute(&self, username: &str, password: String) -> Result<IssuedToken, ApiError> {
        let user = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        let hash = user.hashed_password.clone();
        let verified = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .context("join password verification task")?;
        if !verified {
            return Err(ApiError::InvalidCredentials);
        }

        let issued = issue_token(&user.username, self.auth.token_ttl, &self.auth.jwt_secret)
            .context("issue access token")?;
        tracing::info!(user_id = %user.id, "access token issued");
        Ok(issued)
    }
}

// ── GetCurrentUser ───────────────────────────────────────────────────────────

pub struct GetCurrentUserUseCase<R: UserRepository> {
    pub repo: R,
    pub jwt_secret: String,
}

impl<R: UserRepository> GetCurrentUserUseCase<R> {
    pub async fn execute(&self, token: &str) -> Result<User, ApiError> {
        let username = resolve_token(token, &self.jwt_secret).map_err(|e| {
            tracing::debug!(error = %e, "bearer token rejected");
            ApiError::InvalidToken
        })?;
        self.repo
            .find_by_username(&username)
            .await?
            .ok_or(ApiError::InvalidToken)
    }
}

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub username: String,
    pub password: String,
    pub is_admin: bool,
    pub player: Option<PlayerId>,
}

pub struct CreateUserUseCase<U: UserRepository, P: PlayerRepository> {
    pub users: U,
    pub players: P,
    pub password_cost: u32,
}

impl<U: UserRepository, P: PlayerRepository> CreateUserUseCase<U, P> {
    pub async fn execute(&self, actor: &User, input: CreateUserInput) -> Result<User, ApiError> {
        if !actor.is_admin {
            return Err(ApiError::Forbidden);
        }
        if self.users.find_by_username(&input.username).await?.is_some() {
            return Err(ApiError::UserAlreadyExists(input.username));
        }
        if let Some(player_id) = input.player {
            if self.players.find_by_id(player_id).await?.is_none() {
                return Err(ApiError::PlayerNotFound(player_id));
            }
        }

        let user = User {
            id: UserId::generate(),
            username: input.username,
            hashed_password: hash_blocking(input.password, self.password_cost).await?,
            is_admin: input.is_admin,
            player: input.player,
        };
        self.users.create(&user).await?;
        tracing::info!(user_id = %user.id, created_by = %actor.id, is_admin = user.is_admin, "user created");
        Ok(user)
    }
}

// ── BootstrapAdmin ───────────────────────────────────────────────────────────

/// Creates an admin account without an authenticated actor. Only reachable
/// from the `create-admin` binary.
pub struct BootstrapAdminUseCase<R: UserRepository> {
    pub repo: R,
    pub password_cost: u32,
}

impl<R: UserRepository> BootstrapAdminUseCase<R> {
    pub async fn execute(&self, username: String, password: String) -> Result<User, ApiError> {
        if self.repo.find_by_username(&username).await?.is_some() {
            return Err(ApiError::UserAlreadyExists(username));
        }
        let user = User {
            id: UserId::generate(),
            username,
            hashed_password: hash_blocking(password, self.password_cost).await?,
            is_admin: true,
            player: None,
        };
        self.repo.create(&user).await?;
        tracing::info!(user_id = %user.id, "admin user bootstrapped");
        Ok(user)
    }
}

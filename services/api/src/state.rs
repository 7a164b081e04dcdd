use sea_orm::DatabaseConnection;

use crate::config::ApiConfig;
use crate::infra::db::{DbPlayerRepository, DbTeamRepository, DbUserRepository};
use crate::infra::mojang::MojangResolver;

/// Token and password settings shared by the auth use cases.
#[derive(Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl: chrono::Duration,
    pub password_cost: u32,
}

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub resolver: MojangResolver,
    pub auth: AuthSettings,
}

impl AppState {
    pub fn from_config(config: &ApiConfig, db: DatabaseConnection) -> anyhow::Result<Self> {
        let resolver = MojangResolver::new(
            &config.mojang_api_url,
            &config.mojang_session_url,
            config.mojang_timeout(),
        )?;
        Ok(Self {
            db,
            resolver,
            auth: AuthSettings {
                jwt_secret: config.jwt_secret.clone(),
                token_ttl: config.token_ttl(),
                password_cost: config.bcrypt_cost,
            },
        })
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn player_repo(&self) -> DbPlayerRepository {
        DbPlayerRepository {
            db: self.db.clone(),
        }
    }

    pub fn team_repo(&self) -> DbTeamRepository {
        DbTeamRepository {
            db: self.db.clone(),
        }
    }
}

use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, SqlErr, TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

use cms_api_schema::{players, teams, users};
use cms_domain::id::{PlayerId, TeamId, UserId};

use crate::domain::repository::{PlayerRepository, TeamRepository, UserRepository};
use crate::domain::types::{Player, PlayerChanges, Team, TeamChanges, User};
use crate::error::ApiError;

/// Classify a store failure. Connection loss becomes `Unavailable` and a
/// unique-index hit becomes `DuplicateRecord`; everything else is internal.
trait DbResultExt<T> {
    fn db_context(self, what: &'static str) -> Result<T, ApiError>;
}

impl<T> DbResultExt<T> for Result<T, DbErr> {
    fn db_context(self, what: &'static str) -> Result<T, ApiError> {
        self.map_err(|err| match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => ApiError::Unavailable,
            err if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                ApiError::DuplicateRecord
            }
            err => ApiError::Internal(anyhow::Error::new(err).context(what)),
        })
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .db_context("find user by username")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(user.id.as_uuid()),
            username: Set(user.username.clone()),
            hashed_password: Set(user.hashed_password.clone()),
            is_admin: Set(user.is_admin),
            player: Set(user.player.map(Uuid::from)),
        }
        .insert(&self.db)
        .await
        .db_context("create user")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: UserId(model.id),
        username: model.username,
        hashed_password: model.hashed_password,
        is_admin: model.is_admin,
        player: model.player.map(PlayerId),
    }
}

// ── Player repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPlayerRepository {
    pub db: DatabaseConnection,
}

impl PlayerRepository for DbPlayerRepository {
    async fn list(&self) -> Result<Vec<Player>, ApiError> {
        let models = players::Entity::find()
            .order_by_asc(players::Column::Id)
            .all(&self.db)
            .await
            .db_context("list players")?;
        Ok(models.into_iter().map(player_from_model).collect())
    }

    async fn find_by_id(&self, id: PlayerId) -> Result<Option<Player>, ApiError> {
        let model = players::Entity::find_by_id(id.as_uuid())
            .one(&self.db)
            .await
            .db_context("find player by id")?;
        Ok(model.map(player_from_model))
    }

    async fn find_by_mc_username(&self, mc_username: &str) -> Result<Option<Player>, ApiError> {
        let model = players::Entity::find()
            .filter(players::Column::McUsername.eq(mc_username))
            .one(&self.db)
            .await
            .db_context("find player by mc_username")?;
        Ok(model.map(player_from_model))
    }

    async fn find_by_mc_uuid(&self, mc_uuid: &str) -> Result<Option<Player>, ApiError> {
        let model = players::Entity::find()
            .filter(players::Column::McUuid.eq(mc_uuid))
            .one(&self.db)
            .await
            .db_context("find player by mc_uuid")?;
        Ok(model.map(player_from_model))
    }

    async fn find_by_ids(&self, ids: &[PlayerId]) -> Result<Vec<Player>, ApiError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = players::Entity::find()
            .filter(players::Column::Id.is_in(ids.iter().map(PlayerId::as_uuid)))
            .all(&self.db)
            .await
            .db_context("find players by ids")?;
        Ok(models.into_iter().map(player_from_model).collect())
    }

    async fn create(&self, player: &Player) -> Result<(), ApiError> {
        players::ActiveModel {
            id: Set(player.id.as_uuid()),
            mc_username: Set(player.mc_username.clone()),
            mc_uuid: Set(player.mc_uuid.clone()),
            badges: Set(player.badges.clone()),
        }
        .insert(&self.db)
        .await
        .db_context("create player")?;
        Ok(())
    }

    async fn update(&self, id: PlayerId, changes: &PlayerChanges) -> Result<bool, ApiError> {
        if changes.is_empty() {
            return Ok(self.find_by_id(id).await?.is_some());
        }
        let mut am = <players::ActiveModel as ActiveModelTrait>::default();
        if let Some(mc_username) = &changes.mc_username {
            am.mc_username = Set(mc_username.clone());
        }
        if let Some(mc_uuid) = &changes.mc_uuid {
            am.mc_uuid = Set(mc_uuid.clone());
        }
        if let Some(badges) = &changes.badges {
            am.badges = Set(badges.clone());
        }
        let result = players::Entity::update_many()
            .set(am)
            .filter(players::Column::Id.eq(id.as_uuid()))
            .exec(&self.db)
            .await
            .db_context("update player")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: PlayerId) -> Result<bool, ApiError> {
        let txn = self.db.begin().await.db_context("begin delete player")?;
        let result = players::Entity::delete_by_id(id.as_uuid())
            .exec(&txn)
            .await
            .db_context("delete player")?;
        if result.rows_affected > 0 {
            // `users.player` is cleared by the foreign key; rosters are arrays.
            teams::Entity::update_many()
                .col_expr(
                    teams::Column::Players,
                    Expr::cust_with_values("array_remove(players, $1)", [id.as_uuid()]),
                )
                .filter(Expr::cust_with_values(
                    "players @> $1",
                    [vec![id.as_uuid()]],
                ))
                .exec(&txn)
                .await
                .db_context("remove player from rosters")?;
        }
        txn.commit().await.db_context("commit delete player")?;
        Ok(result.rows_affected > 0)
    }
}

fn player_from_model(model: players::Model) -> Player {
    Player {
        id: PlayerId(model.id),
        mc_username: model.mc_username,
        mc_uuid: model.mc_uuid,
        badges: model.badges,
    }
}

// ── Team repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTeamRepository {
    pub db: DatabaseConnection,
}

impl TeamRepository for DbTeamRepository {
    async fn list(&self) -> Result<Vec<Team>, ApiError> {
        let models = teams::Entity::find()
            .order_by_asc(teams::Column::Id)
            .all(&self.db)
            .await
            .db_context("list teams")?;
        Ok(models.into_iter().map(team_from_model).collect())
    }

    async fn find_by_id(&self, id: TeamId) -> Result<Option<Team>, ApiError> {
        let model = teams::Entity::find_by_id(id.as_uuid())
            .one(&self.db)
            .await
            .db_context("find team by id")?;
        Ok(model.map(team_from_model))
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<Team>, ApiError> {
        let model = teams::Entity::find()
            .filter(teams::Column::Alias.eq(alias))
            .one(&self.db)
            .await
            .db_context("find team by alias")?;
        Ok(model.map(team_from_model))
    }

    async fn find_name_or_alias_conflict(
        &self,
        name: Option<&str>,
        alias: Option<&str>,
        exclude: Option<TeamId>,
    ) -> Result<Option<Team>, ApiError> {
        if name.is_none() && alias.is_none() {
            return Ok(None);
        }
        let mut either = Condition::any();
        if let Some(name) = name {
            either = either.add(teams::Column::Name.eq(name));
        }
        if let Some(alias) = alias {
            either = either.add(teams::Column::Alias.eq(alias));
        }
        let mut cond = Condition::all().add(either);
        if let Some(exclude) = exclude {
            cond = cond.add(teams::Column::Id.ne(exclude.as_uuid()));
        }
        let model = teams::Entity::find()
            .filter(cond)
            .one(&self.db)
            .await
            .db_context("find team name/alias conflict")?;
        Ok(model.map(team_from_model))
    }

    async fn create(&self, team: &Team) -> Result<(), ApiError> {
        teams::ActiveModel {
            id: Set(team.id.as_uuid()),
            name: Set(team.name.clone()),
            alias: Set(team.alias.clone()),
            description: Set(team.description.clone()),
            logo_url: Set(team.logo_url.clone()),
            is_active: Set(team.is_active),
            managers: Set(team.managers.iter().map(UserId::as_uuid).collect()),
            players: Set(team.players.iter().map(PlayerId::as_uuid).collect()),
            badges: Set(team.badges.clone()),
        }
        .insert(&self.db)
        .await
        .db_context("create team")?;
        Ok(())
    }

    async fn update(&self, id: TeamId, changes: &TeamChanges) -> Result<bool, ApiError> {
        if changes.is_empty() {
            return Ok(self.find_by_id(id).await?.is_some());
        }
        let mut am = <teams::ActiveModel as ActiveModelTrait>::default();
        if let Some(name) = &changes.name {
            am.name = Set(name.clone());
        }
        if let Some(alias) = &changes.alias {
            am.alias = Set(alias.clone());
        }
        if let Some(description) = &changes.description {
            am.description = Set(description.clone());
        }
        if let Some(logo_url) = &changes.logo_url {
            am.logo_url = Set(logo_url.clone());
        }
        if let Some(is_active) = changes.is_active {
            am.is_active = Set(is_active);
        }
        if let Some(managers) = &changes.managers {
            am.managers = Set(managers.iter().map(UserId::as_uuid).collect());
        }
        if let Some(players) = &changes.players {
            am.players = Set(players.iter().map(PlayerId::as_uuid).collect());
        }
        if let Some(badges) = &changes.badges {
            am.badges = Set(badges.clone());
        }
        let result = teams::Entity::update_many()
            .set(am)
            .filter(teams::Column::Id.eq(id.as_uuid()))
            .exec(&self.db)
            .await
            .db_context("update team")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: TeamId) -> Result<bool, ApiError> {
        let result = teams::Entity::delete_by_id(id.as_uuid())
            .exec(&self.db)
            .await
            .db_context("delete team")?;
        Ok(result.rows_affected > 0)
    }
}

fn team_from_model(model: teams::Model) -> Team {
    Team {
        id: TeamId(model.id),
        name: model.name,
        alias: model.alias,
        description: model.description,
        logo_url: model.logo_url,
        is_active: model.is_active,
        managers: model.managers.into_iter().map(UserId).collect(),
        players: model.players.into_iter().map(PlayerId).collect(),
        badges: model.badges,
    }
}

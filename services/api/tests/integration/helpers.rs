use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use cms_api::domain::repository::{
    IdentityResolver, PlayerRepository, TeamRepository, UserRepository,
};
use cms_api::domain::types::{McProfile, Player, PlayerChanges, Team, TeamChanges, User};
use cms_api::error::ApiError;
use cms_auth_types::password::hash_password_with_cost;
use cms_domain::id::{PlayerId, TeamId, UserId};

pub const NOTCH_UUID: &str = "069a79f444e94726a5befca90e38aaf5";
pub const JEB_UUID: &str = "853c80ef3c3749fdaa49938b674adae6";

/// Lowest cost bcrypt accepts; keeps hashing fast in tests.
pub const TEST_BCRYPT_COST: u32 = 4;

// ── MemoryStore ──────────────────────────────────────────────────────────────

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    players: Vec<Player>,
    teams: Vec<Team>,
    writes: usize,
    id_lookups: usize,
}

/// In-memory record store implementing every repository port. Clones share
/// the same tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(self, users: Vec<User>) -> Self {
        self.tables.lock().unwrap().users.extend(users);
        self
    }

    pub fn with_players(self, players: Vec<Player>) -> Self {
        self.tables.lock().unwrap().players.extend(players);
        self
    }

    pub fn with_teams(self, teams: Vec<Team>) -> Self {
        self.tables.lock().unwrap().teams.extend(teams);
        self
    }

    pub fn players(&self) -> Vec<Player> {
        self.tables.lock().unwrap().players.clone()
    }

    pub fn teams(&self) -> Vec<Team> {
        self.tables.lock().unwrap().teams.clone()
    }

    pub fn users(&self) -> Vec<User> {
        self.tables.lock().unwrap().users.clone()
    }

    pub fn player(&self, id: PlayerId) -> Option<Player> {
        self.players().into_iter().find(|p| p.id == id)
    }

    /// Number of inserts, updates and deletes performed.
    pub fn writes(&self) -> usize {
        self.tables.lock().unwrap().writes
    }

    /// Number of `find_by_ids` calls.
    pub fn id_lookups(&self) -> usize {
        self.tables.lock().unwrap().id_lookups
    }
}

impl UserRepository for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(ApiError::DuplicateRecord);
        }
        tables.users.push(user.clone());
        tables.writes += 1;
        Ok(())
    }
}

impl PlayerRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Player>, ApiError> {
        Ok(self.players())
    }

    async fn find_by_id(&self, id: PlayerId) -> Result<Option<Player>, ApiError> {
        Ok(self.player(id))
    }

    async fn find_by_mc_username(&self, mc_username: &str) -> Result<Option<Player>, ApiError> {
        Ok(self
            .players()
            .into_iter()
            .find(|p| p.mc_username == mc_username))
    }

    async fn find_by_mc_uuid(&self, mc_uuid: &str) -> Result<Option<Player>, ApiError> {
        Ok(self.players().into_iter().find(|p| p.mc_uuid == mc_uuid))
    }

    async fn find_by_ids(&self, ids: &[PlayerId]) -> Result<Vec<Player>, ApiError> {
        let mut tables = self.tables.lock().unwrap();
        tables.id_lookups += 1;
        // Reverse store order so callers cannot rely on it.
        Ok(tables
            .players
            .iter()
            .rev()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn create(&self, player: &Player) -> Result<(), ApiError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.players.iter().any(|p| p.mc_uuid == player.mc_uuid) {
            return Err(ApiError::DuplicateRecord);
        }
        tables.players.push(player.clone());
        tables.writes += 1;
        Ok(())
    }

    async fn update(&self, id: PlayerId, changes: &PlayerChanges) -> Result<bool, ApiError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(player) = tables.players.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        if let Some(mc_username) = &changes.mc_username {
            player.mc_username = mc_username.clone();
        }
        if let Some(mc_uuid) = &changes.mc_uuid {
            player.mc_uuid = mc_uuid.clone();
        }
        if let Some(badges) = &changes.badges {
            player.badges = badges.clone();
        }
        tables.writes += 1;
        Ok(true)
    }

    async fn delete(&self, id: PlayerId) -> Result<bool, ApiError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.players.len();
        tables.players.retain(|p| p.id != id);
        if tables.players.len() == before {
            return Ok(false);
        }
        for team in &mut tables.teams {
            team.players.retain(|pid| *pid != id);
        }
        for user in &mut tables.users {
            if user.player == Some(id) {
                user.player = None;
            }
        }
        tables.writes += 1;
        Ok(true)
    }
}

impl TeamRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Team>, ApiError> {
        Ok(self.teams())
    }

    async fn find_by_id(&self, id: TeamId) -> Result<Option<Team>, ApiError> {
        Ok(self.teams().into_iter().find(|t| t.id == id))
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<Team>, ApiError> {
        Ok(self.teams().into_iter().find(|t| t.alias == alias))
    }

    async fn find_name_or_alias_conflict(
        &self,
        name: Option<&str>,
        alias: Option<&str>,
        exclude: Option<TeamId>,
    ) -> Result<Option<Team>, ApiError> {
        Ok(self.teams().into_iter().find(|t| {
            Some(t.id) != exclude
                && (name == Some(t.name.as_str()) || alias == Some(t.alias.as_str()))
        }))
    }

    async fn create(&self, team: &Team) -> Result<(), ApiError> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .teams
            .iter()
            .any(|t| t.name == team.name || t.alias == team.alias)
        {
            return Err(ApiError::DuplicateRecord);
        }
        tables.teams.push(team.clone());
        tables.writes += 1;
        Ok(())
    }

    async fn update(&self, id: TeamId, changes: &TeamChanges) -> Result<bool, ApiError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(team) = tables.teams.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        if let Some(name) = &changes.name {
            team.name = name.clone();
        }
        if let Some(alias) = &changes.alias {
            team.alias = alias.clone();
        }
        if let Some(description) = &changes.description {
            team.description = description.clone();
        }
        if let Some(logo_url) = &changes.logo_url {
            team.logo_url = logo_url.clone();
        }
        if let Some(is_active) = changes.is_active {
            team.is_active = is_active;
        }
        if let Some(managers) = &changes.managers {
            team.managers = managers.clone();
        }
        if let Some(players) = &changes.players {
            team.players = players.clone();
        }
        if let Some(badges) = &changes.badges {
            team.badges = badges.clone();
        }
        tables.writes += 1;
        Ok(true)
    }

    async fn delete(&self, id: TeamId) -> Result<bool, ApiError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.teams.len();
        tables.teams.retain(|t| t.id != id);
        let deleted = tables.teams.len() != before;
        if deleted {
            tables.writes += 1;
        }
        Ok(deleted)
    }
}

// ── MockResolver ─────────────────────────────────────────────────────────────

/// Identity resolver over a fixed `(uuid, username)` table that counts calls.
#[derive(Clone, Default)]
pub struct MockResolver {
    profiles: Vec<(String, String)>,
    calls: Arc<AtomicUsize>,
}

impl MockResolver {
    pub fn new(profiles: &[(&str, &str)]) -> Self {
        Self {
            profiles: profiles
                .iter()
                .map(|(uuid, name)| ((*uuid).to_owned(), (*name).to_owned()))
                .collect(),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IdentityResolver for MockResolver {
    async fn resolve_uuid(&self, mc_username: &str) -> Option<McProfile> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.profiles
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(mc_username))
            .map(|(uuid, name)| McProfile {
                mc_uuid: uuid.clone(),
                mc_username: name.clone(),
            })
    }

    async fn resolve_username(&self, mc_uuid: &str) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.profiles
            .iter()
            .find(|(uuid, _)| uuid == mc_uuid)
            .map(|(_, name)| name.clone())
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_player(mc_username: &str, mc_uuid: &str) -> Player {
    Player {
        id: PlayerId::generate(),
        mc_username: mc_username.to_owned(),
        mc_uuid: mc_uuid.to_owned(),
        badges: vec![],
    }
}

pub fn test_team(name: &str, alias: &str) -> Team {
    Team {
        id: TeamId::generate(),
        name: name.to_owned(),
        alias: alias.to_owned(),
        description: None,
        logo_url: None,
        is_active: true,
        managers: vec![],
        players: vec![],
        badges: vec![],
    }
}

pub fn test_user(username: &str, password: &str, is_admin: bool) -> User {
    User {
        id: UserId::generate(),
        username: username.to_owned(),
        hashed_password: hash_password_with_cost(password, TEST_BCRYPT_COST).unwrap(),
        is_admin,
        player: None,
    }
}

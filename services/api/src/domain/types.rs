use cms_domain::id::{PlayerId, TeamId, UserId};

/// Login account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub hashed_password: String,
    pub is_admin: bool,
    /// Player record this account speaks for, if any.
    pub player: Option<PlayerId>,
}

/// A competitor keyed to a Minecraft account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub mc_username: String,
    /// Undashed lower-case hex, as returned by the identity resolver.
    pub mc_uuid: String,
    pub badges: Vec<i32>,
}

/// A Minecraft account as the identity resolver reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McProfile {
    /// Undashed lower-case hex.
    pub mc_uuid: String,
    /// Canonical spelling, which may differ in case from the name looked up.
    pub mc_username: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub alias: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub is_active: bool,
    pub managers: Vec<UserId>,
    /// Roster in insertion order. Entries may point at deleted players.
    pub players: Vec<PlayerId>,
    pub badges: Vec<i32>,
}

/// Field changes applied to a stored player. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerChanges {
    pub mc_username: Option<String>,
    pub mc_uuid: Option<String>,
    pub badges: Option<Vec<i32>>,
}

impl PlayerChanges {
    pub fn is_empty(&self) -> bool {
        self.mc_username.is_none() && self.mc_uuid.is_none() && self.badges.is_none()
    }
}

/// Field changes applied to a stored team.
///
/// `description` and `logo_url` are nullable: `Some(None)` clears the value,
/// `None` leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamChanges {
    pub name: Option<String>,
    pub alias: Option<String>,
    pub description: Option<Option<String>>,
    pub logo_url: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub managers: Option<Vec<UserId>>,
    pub players: Option<Vec<PlayerId>>,
    pub badges: Option<Vec<i32>>,
}

impl TeamChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.alias.is_none()
            && self.description.is_none()
            && self.logo_url.is_none()
            && self.is_active.is_none()
            && self.managers.is_none()
            && self.players.is_none()
            && self.badges.is_none()
    }
}

/// Drop repeated entries, keeping the first occurrence of each.
pub fn dedup_preserving_order<T: PartialEq + Clone>(items: &[T]) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(item) {
            out.push(item.clone());
        }
    }
    out
}

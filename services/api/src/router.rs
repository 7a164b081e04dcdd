use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use cms_core::health::healthz;
use cms_core::middleware::request_id_layer;

use crate::handlers::{
    auth::{create_user, get_me, login},
    health::readyz,
    player::{
        create_player, delete_player, get_player, get_player_by_username, list_players,
        update_player,
    },
    team::{
        add_roster_player, create_team, delete_team, get_roster, get_team, get_team_by_alias,
        list_teams, remove_roster_player, update_team,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/oauth2/token", post(login))
        .route("/oauth2/users/me", get(get_me))
        .route("/oauth2/users", post(create_user))
        // Players
        .route("/players", get(list_players).post(create_player))
        .route("/players/id/{id}", get(get_player))
        .route("/players/mc_username/{mc_username}", get(get_player_by_username))
        .route("/players/{id}", put(update_player).delete(delete_player))
        // Teams
        .route("/teams", get(list_teams).post(create_team))
        .route("/teams/id/{id}", get(get_team))
        .route("/teams/alias/{alias}", get(get_team_by_alias))
        .route("/teams/{id}", put(update_team).delete(delete_team))
        // Rosters
        .route("/teams/{id}/players", get(get_roster))
        .route(
            "/teams/{id}/players/{player_id}",
            put(add_roster_player).delete(remove_roster_player),
        )
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}

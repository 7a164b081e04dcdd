//! In-process fake of the Mojang profile endpoints.
//!
//! Serves the two lookups the identity resolver depends on:
//!
//! - `GET /users/profiles/minecraft/{name}` → `{"id", "name"}` or 404
//! - `GET /session/minecraft/profile/{uuid}` → `{"id", "name"}` or 204
//!
//! Both live on the same base URL, so pass [`FakeMojang::base_url`] as both
//! the API and session URL.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

/// Known `(uuid, name)` profiles.
type Profiles = Arc<Vec<(String, String)>>;

pub struct FakeMojang {
    pub base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl FakeMojang {
    /// Bind on an ephemeral localhost port and serve `profiles`.
    pub async fn start(profiles: &[(&str, &str)]) -> Self {
        let profiles: Profiles = Arc::new(
            profiles
                .iter()
                .map(|(uuid, name)| ((*uuid).to_owned(), (*name).to_owned()))
                .collect(),
        );
        let router = Router::new()
            .route("/users/profiles/minecraft/{name}", get(by_name))
            .route("/session/minecraft/profile/{uuid}", get(by_uuid))
            .route("/broken/users/profiles/minecraft/{name}", get(broken))
            .with_state(profiles);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake mojang");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        Self {
            base_url: format!("http://{addr}"),
            handle,
        }
    }

    /// Base URL whose name lookup answers with an undecodable body.
    pub fn broken_url(&self) -> String {
        format!("{}/broken", self.base_url)
    }
}

impl Drop for FakeMojang {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn by_name(State(profiles): State<Profiles>, Path(name): Path<String>) -> Response {
    // Mojang matches names case-insensitively and answers with the canonical casing.
    match profiles
        .iter()
        .find(|(_, n)| n.eq_ignore_ascii_case(&name))
    {
        Some((uuid, name)) => Json(json!({ "id": uuid, "name": name })).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn by_uuid(State(profiles): State<Profiles>, Path(uuid): Path<String>) -> Response {
    match profiles.iter().find(|(u, _)| *u == uuid) {
        Some((uuid, name)) => Json(json!({ "id": uuid, "name": name })).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

async fn broken() -> &'static str {
    "<html>not json</html>"
}

use std::time::Duration;

use anyhow::Context as _;
use reqwest::{StatusCode, Url};
use serde::Deserialize;

use cms_domain::minecraft::normalize_mc_uuid;

use crate::domain::repository::IdentityResolver;
use crate::domain::types::McProfile;

#[derive(Deserialize)]
struct Profile {
    id: String,
    name: String,
}

/// Identity resolver backed by the public Mojang profile API.
#[derive(Clone)]
pub struct MojangResolver {
    client: reqwest::Client,
    api_url: Url,
    session_url: Url,
}

impl MojangResolver {
    pub fn new(api_url: &str, session_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build mojang http client")?;
        Ok(Self {
            client,
            api_url: Url::parse(api_url).context("parse MOJANG_API_URL")?,
            session_url: Url::parse(session_url).context("parse MOJANG_SESSION_URL")?,
        })
    }

    async fn fetch_profile(&self, base: &Url, segments: &[&str]) -> Option<Profile> {
        let mut url = base.clone();
        url.path_segments_mut().ok()?.pop_if_empty().extend(segments);

        let resp = match self.client.get(url.clone()).send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(error = %e, url = %url, "mojang lookup failed");
                return None;
            }
        };
        if resp.status() != StatusCode::OK {
            tracing::debug!(status = %resp.status(), url = %url, "mojang profile not found");
            return None;
        }
        match resp.json::<Profile>().await {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::warn!(error = %e, url = %url, "undecodable mojang response");
                None
            }
        }
    }
}

impl IdentityResolver for MojangResolver {
    async fn resolve_uuid(&self, mc_username: &str) -> Option<McProfile> {
        let profile = self
            .fetch_profile(
                &self.api_url,
                &["users", "profiles", "minecraft", mc_username],
            )
            .await?;
        Some(McProfile {
            mc_uuid: normalize_mc_uuid(&profile.id)?,
            mc_username: profile.name,
        })
    }

    async fn resolve_username(&self, mc_uuid: &str) -> Option<String> {
        let profile = self
            .fetch_profile(
                &self.session_url,
                &["session", "minecraft", "profile", mc_uuid],
            )
            .await?;
        Some(profile.name)
    }
}

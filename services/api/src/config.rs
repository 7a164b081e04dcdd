use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use cms_core::config::Config;

/// API service configuration loaded from environment variables.
#[derive(Deserialize)]
pub struct ApiConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// HMAC secret for signing bearer tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// TCP port for the HTTP server (default 8000). Env var: `API_PORT`.
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    /// Bearer-token lifetime in minutes (default 30). Env var: `ACCESS_TOKEN_TTL_MINUTES`.
    #[serde(default = "default_access_token_ttl_minutes")]
    pub access_token_ttl_minutes: i64,
    /// bcrypt work factor for new password hashes. Env var: `BCRYPT_COST`.
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    /// Base URL for username → UUID lookups. Env var: `MOJANG_API_URL`.
    #[serde(default = "default_mojang_api_url")]
    pub mojang_api_url: String,
    /// Base URL for UUID → username lookups. Env var: `MOJANG_SESSION_URL`.
    #[serde(default = "default_mojang_session_url")]
    pub mojang_session_url: String,
    /// Per-request timeout for Mojang lookups (default 10). Env var: `MOJANG_TIMEOUT_SECS`.
    #[serde(default = "default_mojang_timeout_secs")]
    pub mojang_timeout_secs: u64,
}

impl Config for ApiConfig {}

impl ApiConfig {
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.access_token_ttl_minutes)
    }

    pub fn mojang_timeout(&self) -> Duration {
        Duration::from_secs(self.mojang_timeout_secs)
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("database_url", &"<redacted>")
            .field("jwt_secret", &"<redacted>")
            .field("api_port", &self.api_port)
            .field("access_token_ttl_minutes", &self.access_token_ttl_minutes)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("mojang_api_url", &self.mojang_api_url)
            .field("mojang_session_url", &self.mojang_session_url)
            .field("mojang_timeout_secs", &self.mojang_timeout_secs)
            .finish()
    }
}

/// Configuration for the `create-admin` bootstrap binary.
#[derive(Deserialize)]
pub struct BootstrapConfig {
    pub database_url: String,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Config for BootstrapConfig {}

fn default_api_port() -> u16 {
    8000
}

fn default_access_token_ttl_minutes() -> i64 {
    cms_auth_types::token::DEFAULT_ACCESS_TOKEN_TTL.num_minutes()
}

fn default_bcrypt_cost() -> u32 {
    cms_auth_types::password::DEFAULT_COST
}

fn default_mojang_api_url() -> String {
    "https://api.mojang.com".to_owned()
}

fn default_mojang_session_url() -> String {
    "https://sessionserver.mojang.com".to_owned()
}

fn default_mojang_timeout_secs() -> u64 {
    10
}

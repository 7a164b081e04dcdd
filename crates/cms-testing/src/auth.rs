//! Bearer-token helpers for authenticated test requests.

use chrono::Duration;

use cms_auth_types::token::{DEFAULT_ACCESS_TOKEN_TTL, issue_token};

/// Secret shared by test app state and the tokens minted here.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-unit-tests-only";

/// Identity whose tokens are signed with [`TEST_JWT_SECRET`].
pub struct TestAuth {
    pub username: String,
}

impl TestAuth {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_owned(),
        }
    }

    /// A token valid for the default lifetime.
    pub fn token(&self) -> String {
        self.token_with_ttl(DEFAULT_ACCESS_TOKEN_TTL)
    }

    /// A token that expired a minute ago.
    pub fn expired_token(&self) -> String {
        self.token_with_ttl(Duration::seconds(-60))
    }

    pub fn token_with_ttl(&self, ttl: Duration) -> String {
        issue_token(&self.username, ttl, TEST_JWT_SECRET)
            .expect("sign test token")
            .token
    }
}

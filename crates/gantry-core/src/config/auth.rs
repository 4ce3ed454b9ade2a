//! Token verification configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC secret used to verify bearer tokens.
    /// For security: prefer setting env var `GANTRY_AUTH_SECRET`.
    #[serde(default = "default_secret")]
    pub secret: String,

    /// Lifetime in seconds for tokens minted by the `issue` helper.
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
}

fn default_secret() -> String {
    "changeme".to_string()
}

fn default_token_ttl_secs() -> u64 {
    3600
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            token_ttl_secs: default_token_ttl_secs(),
        }
    }
}

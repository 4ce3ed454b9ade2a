//! HTTP server configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address, e.g. "0.0.0.0:8080".
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Origin allowed to call the gateway from a browser.
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_allowed_origin() -> String {
    "http://localhost:5174".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            allowed_origin: default_allowed_origin(),
        }
    }
}

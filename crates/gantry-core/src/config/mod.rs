//! Configuration types for the Gantry API gateway.
//!
//! The gateway reads a single TOML file (`gantry.toml` by default); every
//! section and field has a default so a missing file yields a runnable
//! development configuration.

pub mod audit;
pub mod auth;
pub mod server;
pub mod upstream;

use serde::{Deserialize, Serialize};

pub use audit::{AuditConfig, StorageBackend};
pub use auth::AuthConfig;
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;

/// Complete gateway configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub audit: AuditConfig,

    #[serde(default)]
    pub upstream: UpstreamConfig,
}

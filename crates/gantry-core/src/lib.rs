//! Configuration types shared across the Gantry crates.

pub mod config;

pub use config::{
    AuditConfig, AuthConfig, GatewayConfig, ServerConfig, StorageBackend, UpstreamConfig,
};

//! Downstream service endpoints.
//!
//! The gateway forwards to three backends: the ERP server (employees,
//! materials, inventory, orders, plans), the MES server (shipments), and
//! the drone image server.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the ERP server.
    #[serde(default = "default_erp")]
    pub erp_base_url: String,

    /// Base URL of the MES (manufacturing execution) server.
    #[serde(default = "default_mes")]
    pub mes_base_url: String,

    /// Base URL of the drone image server.
    #[serde(default = "default_drone")]
    pub drone_base_url: String,

    /// Per-request timeout in seconds for downstream calls.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_erp() -> String {
    "http://localhost:8081".to_string()
}

fn default_mes() -> String {
    "http://localhost:8082".to_string()
}

fn default_drone() -> String {
    "http://localhost:8084".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            erp_base_url: default_erp(),
            mes_base_url: default_mes(),
            drone_base_url: default_drone(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

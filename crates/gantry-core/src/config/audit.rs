//! Audit logging configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the audit record store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Whether audit recording is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Storage backend for completed records.
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory holding the JSON-Lines log (file backend).
    #[serde(default = "default_directory")]
    pub directory: String,

    /// SQLite database path (sqlite backend).
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

/// Storage backend type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Append JSON lines to a file.
    #[default]
    File,
    /// Store in a SQLite database.
    Sqlite,
    /// Log to stdout; reads return nothing.
    Console,
    /// Keep records in process memory only.
    Memory,
}

fn default_enabled() -> bool {
    true
}

fn default_directory() -> String {
    "data".to_string()
}

fn default_database_path() -> String {
    "data/gantry-audit.sqlite".to_string()
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            backend: StorageBackend::default(),
            directory: default_directory(),
            database_path: default_database_path(),
        }
    }
}

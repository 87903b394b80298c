use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level application configuration. Built once at process startup and
/// passed by reference into the gateway and the persistence layer; nothing
/// reads configuration ambiently after that.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub gateway: GatewayConfig,
    pub database: DatabaseConfig,
    pub migrations: MigrationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("openshelf.db"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Directory holding `{version}__{name}.sql` scripts.
    pub dir: PathBuf,
    /// Minimum script version eligible for execution; scripts below this are
    /// assumed already applied by earlier deployments.
    pub start_version: u32,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("migrations"),
            start_version: 1,
        }
    }
}

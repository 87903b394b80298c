use std::path::Path;

use openshelf_common::{Error, Result};
use tracing::info;

use crate::model::AppConfig;

/// Loads `AppConfig` from an optional YAML/TOML file, then applies
/// `OPENSHELF_*` environment overrides on top.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: Option<&Path>) -> Result<AppConfig> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => AppConfig::default(),
        };
        Self::apply_env_overrides(&mut config)?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<AppConfig> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let config = match ext {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .map_err(|e| Error::Config(format!("YAML parse error: {e}")))?,
            "toml" => toml::from_str(&contents)
                .map_err(|e| Error::Config(format!("TOML parse error: {e}")))?,
            other => {
                return Err(Error::Config(format!(
                    "unsupported config extension: {other}"
                )));
            }
        };

        info!("loaded config from {}", path.display());
        Ok(config)
    }

    fn apply_env_overrides(config: &mut AppConfig) -> Result<()> {
        if let Ok(host) = std::env::var("OPENSHELF_HOST") {
            config.gateway.host = host;
        }
        if let Ok(port) = std::env::var("OPENSHELF_PORT") {
            config.gateway.port = port
                .parse()
                .map_err(|_| Error::Config(format!("OPENSHELF_PORT is not a valid port: {port}")))?;
        }
        if let Ok(path) = std::env::var("OPENSHELF_DATABASE_PATH") {
            config.database.path = path.into();
        }
        if let Ok(dir) = std::env::var("OPENSHELF_MIGRATIONS_DIR") {
            config.migrations.dir = dir.into();
        }
        if let Ok(version) = std::env::var("OPENSHELF_MIGRATION_START_VERSION") {
            config.migrations.start_version = version.parse().map_err(|_| {
                Error::Config(format!(
                    "OPENSHELF_MIGRATION_START_VERSION is not an integer: {version}"
                ))
            })?;
        }
        Ok(())
    }
}

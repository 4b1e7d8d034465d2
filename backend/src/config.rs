//! Service configuration.
//!
//! Values come from, in increasing precedence: built-in defaults, optional
//! `config/default.*` and `config/local.*` files, and environment variables
//! prefixed `LEASE_INGEST` with `__` between path segments, e.g.
//! `LEASE_INGEST__SERVER__PORT=9000` or
//! `LEASE_INGEST__VALIDATION__DATE_FORMATS=%Y-%m-%d,%d.%m.%Y`.

use crate::ingest::validate::ValidationRules;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub validation: ValidationRules,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Limit for JSON request bodies.
    pub json_limit_bytes: usize,
    /// Limit for an uploaded CSV file.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            json_limit_bytes: 10 * 1024 * 1024,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: "lease_uploads.sqlite".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `env_logger` filter; `RUST_LOG` overrides it.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("LEASE_INGEST")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("validation.date_formats")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("server.port must be greater than 0".into()));
        }
        if self.server.json_limit_bytes == 0 || self.server.max_upload_bytes == 0 {
            return Err(ConfigError::Message(
                "server request size limits must be greater than 0".into(),
            ));
        }
        if self.storage.database_path.trim().is_empty() {
            return Err(ConfigError::Message("storage.database_path must not be empty".into()));
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Message(format!(
                "Invalid log level: {}. Must be one of: {:?}",
                self.logging.level, LOG_LEVELS
            )));
        }
        if self.validation.date_formats.iter().all(|f| f.trim().is_empty()) {
            return Err(ConfigError::Message(
                "validation.date_formats must list at least one format".into(),
            ));
        }
        Ok(())
    }
}

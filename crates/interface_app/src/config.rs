//! Application configuration

use serde::Deserialize;
use std::path::PathBuf;

use infra_db::{DatabaseConfig, DatabaseError};

use crate::telemetry::LogFormat;

/// Prefix of the environment variables read by [`AppConfig::from_env`]
pub const ENV_PREFIX: &str = "LIGHTBNB";

/// Which store backs the booking port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// PostgreSQL through a connection pool
    #[default]
    Postgres,
    /// JSON files loaded into memory
    Fixtures,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendKind,
    /// Full connection URL; overrides the `db_*` parts when set
    pub database_url: Option<String>,
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub db_max_connections: u32,
    /// Directory holding `users.json`, `properties.json` and friends
    pub fixtures_dir: PathBuf,
    /// Log level
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Postgres,
            database_url: None,
            db_host: "localhost".to_string(),
            db_port: 5432,
            db_user: "vagrant".to_string(),
            db_password: "123".to_string(),
            db_name: "lightbnb".to_string(),
            db_max_connections: 10,
            fixtures_dir: PathBuf::from("server/json"),
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Loads configuration from `LIGHTBNB_*` environment variables
    ///
    /// Unset keys keep their defaults.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_environment(config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Loads configuration from an explicit environment source
    pub fn from_environment(env: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Pool settings for the configured database
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::ConnectionFailed` if `database_url` is set but
    /// cannot be parsed.
    pub fn database_config(&self) -> Result<DatabaseConfig, DatabaseError> {
        let config = match &self.database_url {
            Some(url) => DatabaseConfig::from_url(url)?,
            None => DatabaseConfig::from_parts(
                &self.db_host,
                self.db_port,
                &self.db_user,
                &self.db_password,
                &self.db_name,
            ),
        };
        Ok(config.max_connections(self.db_max_connections))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, config::ConfigError> {
        let source: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_environment(config::Environment::with_prefix(ENV_PREFIX).source(Some(source)))
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(load(&[]).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let config = load(&[
            ("LIGHTBNB_BACKEND", "fixtures"),
            ("LIGHTBNB_DB_PORT", "6543"),
            ("LIGHTBNB_DB_NAME", "lightbnb_dev"),
            ("LIGHTBNB_FIXTURES_DIR", "/tmp/fixtures"),
            ("LIGHTBNB_LOG_FORMAT", "json"),
        ])
        .unwrap();

        assert_eq!(config.backend, BackendKind::Fixtures);
        assert_eq!(config.db_port, 6543);
        assert_eq!(config.db_name, "lightbnb_dev");
        assert_eq!(config.fixtures_dir, PathBuf::from("/tmp/fixtures"));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.db_user, "vagrant");
    }

    #[test]
    fn test_numeric_password_stays_text() {
        let config = load(&[("LIGHTBNB_DB_PASSWORD", "456")]).unwrap();
        assert_eq!(config.db_password, "456");
    }

    #[test]
    fn test_unknown_backend_rejected() {
        assert!(load(&[("LIGHTBNB_BACKEND", "mongo")]).is_err());
    }

    #[test]
    fn test_database_config_uses_parts() {
        let config = AppConfig {
            db_max_connections: 3,
            ..Default::default()
        };
        let db = config.database_config().unwrap();
        assert_eq!(db.max_connections, 3);
        assert_eq!(db.connect_options.get_host(), "localhost");
        assert_eq!(db.connect_options.get_database(), Some("lightbnb"));
    }

    #[test]
    fn test_database_url_overrides_parts() {
        let config = load(&[
            ("LIGHTBNB_DATABASE_URL", "postgres://app:pw@db.internal:6543/lightbnb_prod"),
            ("LIGHTBNB_DB_HOST", "ignored"),
        ])
        .unwrap();

        let db = config.database_config().unwrap();
        assert_eq!(db.connect_options.get_host(), "db.internal");
        assert_eq!(db.connect_options.get_port(), 6543);
        assert_eq!(db.connect_options.get_database(), Some("lightbnb_prod"));
        assert_eq!(db.max_connections, 10);
    }

    #[test]
    fn test_malformed_database_url_rejected() {
        let config = AppConfig {
            database_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(config.database_config().is_err());
    }
}

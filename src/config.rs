//! Configuration module
//!
//! The service reads a single TOML file (default
//! `~/.config/sendit/config.toml`). Every section and key is optional;
//! anything left out falls back to the defaults below.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 5000
//!
//! [database]
//! url = "sqlite://./sendit.db?mode=rwc"
//!
//! [security]
//! jwt_secret = "change-me"
//! jwt_expiration_ms = 604800000
//!
//! [admin]
//! username = "admin"
//! email = "admin@sendit.local"
//! password = "admin123"
//!
//! [logging]
//! level = "info"
//! format = "text"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::crypto::jwt::{JwtConfig, DEFAULT_EXPIRATION_MS};
use crate::infrastructure::database::DatabaseConfig;

const DEFAULT_JWT_SECRET: &str = "sendit-development-secret-change-me";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sendit")
        .join("config.toml")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub security: SecuritySection,
    pub admin: AdminSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        let db = DatabaseConfig::default();
        Self {
            url: db.url,
            max_connections: db.max_connections,
            min_connections: db.min_connections,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecuritySection {
    pub jwt_secret: String,
    pub jwt_expiration_ms: i64,
}

impl Default for SecuritySection {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            jwt_expiration_ms: DEFAULT_EXPIRATION_MS,
        }
    }
}

/// Administrator created on startup when no user holds `ROLE_ADMIN`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminSection {
    pub enabled: bool,
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl Default for AdminSection {
    fn default() -> Self {
        Self {
            enabled: true,
            username: "admin".to_string(),
            email: "admin@sendit.local".to_string(),
            password: "admin123".to_string(),
            first_name: "SendIT".to_string(),
            last_name: "Admin".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// `EnvFilter` directive, e.g. `info` or `sendit=debug,tower_http=info`
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl AppConfig {
    /// Read and validate the file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".into()));
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid("database.url must be set".into()));
        }
        if self.database.max_connections == 0
            || self.database.min_connections > self.database.max_connections
        {
            return Err(ConfigError::Invalid(
                "database connections: need 0 < min_connections <= max_connections".into(),
            ));
        }
        if self.security.jwt_secret.is_empty() {
            return Err(ConfigError::Invalid("security.jwt_secret must be set".into()));
        }
        if self.security.jwt_expiration_ms <= 0 {
            return Err(ConfigError::Invalid(
                "security.jwt_expiration_ms must be positive".into(),
            ));
        }
        if self.admin.enabled
            && (self.admin.username.trim().is_empty()
                || self.admin.email.trim().is_empty()
                || self.admin.password.is_empty())
        {
            return Err(ConfigError::Invalid(
                "admin.username, admin.email and admin.password are required when admin.enabled"
                    .into(),
            ));
        }
        match self.logging.format.to_lowercase().as_str() {
            "text" | "json" => Ok(()),
            other => Err(ConfigError::Invalid(format!(
                "logging.format must be text or json, got {}",
                other
            ))),
        }
    }

    /// True when the JWT secret was never changed from the built-in value.
    pub fn uses_default_secret(&self) -> bool {
        self.security.jwt_secret == DEFAULT_JWT_SECRET
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            min_connections: self.database.min_connections,
        }
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig::new(
            self.security.jwt_secret.clone(),
            self.security.jwt_expiration_ms,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.security.jwt_expiration_ms, 604_800_000);
        assert!(cfg.admin.enabled);
        assert!(cfg.uses_default_secret());
        cfg.validate().unwrap();
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [server]
            port = 8080

            [security]
            jwt_secret = "s3cret"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.listen_addr(), "0.0.0.0:8080");
        assert_eq!(cfg.server.shutdown_timeout, 30);
        assert!(!cfg.uses_default_secret());
        assert_eq!(cfg.jwt_config().expiration_ms, DEFAULT_EXPIRATION_MS);
    }

    #[test]
    fn rejects_unknown_log_format() {
        let cfg = AppConfig::from_toml("[logging]\nformat = \"xml\"").unwrap();
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_non_positive_expiration() {
        let cfg = AppConfig::from_toml("[security]\njwt_expiration_ms = 0").unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn disabled_admin_needs_no_credentials() {
        let cfg = AppConfig::from_toml("[admin]\nenabled = false\npassword = \"\"").unwrap();
        cfg.validate().unwrap();
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = AppConfig::load(Path::new("/definitely/not/here/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn default_path_ends_with_sendit_config() {
        assert!(default_config_path().ends_with("sendit/config.toml"));
    }
}

//! Configuration loading for the CRM tools
//!
//! Database connection parameters are resolved per field in this order:
//! 1. Command-line override (highest priority)
//! 2. Environment variable (`DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER`, `DB_PASSWORD`)
//! 3. TOML config file (`[database]` section)
//! 4. Compiled default (fallback)
//!
//! A missing TOML file is normal. A malformed one is logged and ignored so
//! that the environment and defaults still apply.

use crate::{Error, Result};
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_NAME: &str = "crm_db";
pub const DEFAULT_DB_USER: &str = "postgres";

/// Environment variable pointing at an explicit TOML config file
pub const CONFIG_PATH_ENV: &str = "CRM_CONFIG";

/// Contents of the optional TOML config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub database: DatabaseSection,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[database]` section of the TOML file; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub name: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Values supplied on the command line, if any
#[derive(Debug, Clone, Default)]
pub struct DatabaseOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

/// Fully resolved PostgreSQL connection parameters
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_DB_HOST.to_string(),
            port: DEFAULT_DB_PORT,
            database: DEFAULT_DB_NAME.to_string(),
            user: DEFAULT_DB_USER.to_string(),
            password: String::new(),
        }
    }
}

impl DatabaseConfig {
    /// Resolve every field through override → environment → TOML → default
    pub fn resolve(overrides: &DatabaseOverrides, toml_config: &TomlConfig) -> Self {
        let defaults = Self::default();
        let section = &toml_config.database;

        let host = overrides
            .host
            .clone()
            .or_else(|| env_string("DB_HOST"))
            .or_else(|| section.host.clone())
            .unwrap_or(defaults.host);

        let port = overrides
            .port
            .or_else(env_port)
            .or(section.port)
            .unwrap_or(defaults.port);

        let database = overrides
            .database
            .clone()
            .or_else(|| env_string("DB_NAME"))
            .or_else(|| section.name.clone())
            .unwrap_or(defaults.database);

        let user = overrides
            .user
            .clone()
            .or_else(|| env_string("DB_USER"))
            .or_else(|| section.user.clone())
            .unwrap_or(defaults.user);

        let password = overrides
            .password
            .clone()
            .or_else(|| env_string("DB_PASSWORD"))
            .or_else(|| section.password.clone())
            .unwrap_or(defaults.password);

        Self {
            host,
            port,
            database,
            user,
            password,
        }
    }

    /// Connection options for sqlx; the password is only set when non-empty
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user);

        if self.password.is_empty() {
            options
        } else {
            options.password(&self.password)
        }
    }
}

// Never print the password
impl fmt::Display for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "postgres://{}@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn env_port() -> Option<u16> {
    let raw = env_string("DB_PORT")?;
    match raw.trim().parse::<u16>() {
        Ok(port) => Some(port),
        Err(_) => {
            warn!("Ignoring invalid DB_PORT value: {:?}", raw);
            None
        }
    }
}

/// Location of the TOML config file
///
/// `CRM_CONFIG` wins; otherwise `<config_dir>/crm/config.toml`.
pub fn config_file_path() -> Option<PathBuf> {
    if let Some(path) = env_string(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("crm").join("config.toml"))
}

/// Parse a TOML config file
pub fn load_toml_config_from(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Load the TOML config; a missing file yields defaults
///
/// Fails only when the file exists but cannot be read or parsed.
pub fn try_load_toml_config() -> Result<TomlConfig> {
    let Some(path) = config_file_path() else {
        debug!("No config directory available, using defaults");
        return Ok(TomlConfig::default());
    };

    if !path.exists() {
        debug!("Config file not found: {}", path.display());
        return Ok(TomlConfig::default());
    }

    let config = load_toml_config_from(&path)?;
    debug!("Loaded config file: {}", path.display());
    Ok(config)
}

/// Load the TOML config, degrading to defaults when absent or unreadable
pub fn load_toml_config() -> TomlConfig {
    try_load_toml_config().unwrap_or_else(|e| {
        warn!("Ignoring config file: {}", e);
        TomlConfig::default()
    })
}

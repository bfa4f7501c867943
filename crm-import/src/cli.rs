//! Command-line options shared by the binaries

use clap::Args;
use crm_common::config::{DatabaseConfig, DatabaseOverrides, TomlConfig};

/// Database connection overrides; unset flags fall back to the
/// environment, then the config file, then defaults
#[derive(Args, Debug, Clone, Default)]
pub struct DatabaseArgs {
    /// Database host
    #[arg(long = "db-host", value_name = "HOST")]
    pub host: Option<String>,

    /// Database port
    #[arg(long = "db-port", value_name = "PORT")]
    pub port: Option<u16>,

    /// Database name
    #[arg(long = "db-name", value_name = "NAME")]
    pub database: Option<String>,

    /// Database user
    #[arg(long = "db-user", value_name = "USER")]
    pub user: Option<String>,

    /// Database password
    #[arg(long = "db-password", value_name = "PASSWORD")]
    pub password: Option<String>,
}

impl DatabaseArgs {
    pub fn overrides(&self) -> DatabaseOverrides {
        DatabaseOverrides {
            host: self.host.clone(),
            port: self.port,
            database: self.database.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
        }
    }

    pub fn resolve(&self, toml_config: &TomlConfig) -> DatabaseConfig {
        DatabaseConfig::resolve(&self.overrides(), toml_config)
    }
}

/// One-line build identification for the startup banner
pub fn build_info() -> String {
    format!(
        "v{} ({} {}, built {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_PROFILE"),
        env!("BUILD_TIMESTAMP")
    )
}

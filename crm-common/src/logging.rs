//! Tracing subscriber setup shared by the CRM binaries

use crate::config::{try_load_toml_config, LoggingConfig, TomlConfig};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Filter directives for the configured level
///
/// `RUST_LOG` takes precedence when set.
pub fn build_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = logging.level.trim().to_ascii_lowercase();
        EnvFilter::new(format!("crm_import={level},crm_common={level},warn"))
    })
}

/// Install the global fmt subscriber
pub fn init_tracing(logging: &LoggingConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(logging))
        .with_target(false)
        .init();
}

/// Load the TOML config and install tracing from its `[logging]` section
///
/// A malformed config file is reported once the subscriber is up, then
/// ignored.
pub fn init_from_config() -> TomlConfig {
    let (config, load_error) = match try_load_toml_config() {
        Ok(config) => (config, None),
        Err(e) => (TomlConfig::default(), Some(e)),
    };

    init_tracing(&config.logging);

    if let Some(e) = load_error {
        warn!("Ignoring config file: {}", e);
    }
    config
}

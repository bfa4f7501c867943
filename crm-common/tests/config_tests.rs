//! Tests for database configuration resolution
//!
//! Covers the priority order override → environment → TOML → default and
//! graceful handling of missing or malformed config files.
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate DB_* or CRM_CONFIG are marked with #[serial].

use crm_common::config::{
    config_file_path, load_toml_config, load_toml_config_from, DatabaseConfig,
    DatabaseOverrides, TomlConfig, CONFIG_PATH_ENV,
};
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

const DB_VARS: [&str; 5] = ["DB_HOST", "DB_PORT", "DB_NAME", "DB_USER", "DB_PASSWORD"];

fn clear_db_env() {
    for var in DB_VARS {
        env::remove_var(var);
    }
    env::remove_var(CONFIG_PATH_ENV);
}

#[test]
#[serial]
fn test_defaults_when_nothing_configured() {
    clear_db_env();

    let resolved = DatabaseConfig::resolve(&DatabaseOverrides::default(), &TomlConfig::default());

    assert_eq!(resolved, DatabaseConfig::default());
    assert_eq!(resolved.host, "localhost");
    assert_eq!(resolved.port, 5432);
    assert_eq!(resolved.database, "crm_db");
}

#[test]
#[serial]
fn test_environment_overrides_defaults() {
    clear_db_env();
    env::set_var("DB_HOST", "pg.example.net");
    env::set_var("DB_PORT", "6432");
    env::set_var("DB_NAME", "crm_staging");
    env::set_var("DB_USER", "importer");
    env::set_var("DB_PASSWORD", "s3cret");

    let resolved = DatabaseConfig::resolve(&DatabaseOverrides::default(), &TomlConfig::default());

    assert_eq!(resolved.host, "pg.example.net");
    assert_eq!(resolved.port, 6432);
    assert_eq!(resolved.database, "crm_staging");
    assert_eq!(resolved.user, "importer");
    assert_eq!(resolved.password, "s3cret");

    clear_db_env();
}

#[test]
#[serial]
fn test_environment_beats_toml_and_override_beats_environment() {
    clear_db_env();
    env::set_var("DB_HOST", "env-host");
    env::set_var("DB_USER", "env-user");

    let toml_config: TomlConfig = toml::from_str(
        r#"
        [database]
        host = "toml-host"
        user = "toml-user"
        name = "toml_db"
        "#,
    )
    .unwrap();
    let overrides = DatabaseOverrides {
        user: Some("cli-user".to_string()),
        ..Default::default()
    };

    let resolved = DatabaseConfig::resolve(&overrides, &toml_config);

    assert_eq!(resolved.host, "env-host");
    assert_eq!(resolved.user, "cli-user");
    assert_eq!(resolved.database, "toml_db");

    clear_db_env();
}

#[test]
#[serial]
fn test_invalid_port_falls_through() {
    clear_db_env();
    env::set_var("DB_PORT", "not-a-port");

    let toml_config: TomlConfig = toml::from_str("[database]\nport = 7000\n").unwrap();
    let resolved = DatabaseConfig::resolve(&DatabaseOverrides::default(), &toml_config);

    assert_eq!(resolved.port, 7000);

    clear_db_env();
}

#[test]
#[serial]
fn test_config_path_env_wins() {
    clear_db_env();
    env::set_var(CONFIG_PATH_ENV, "/tmp/crm-test/config.toml");

    assert_eq!(
        config_file_path().unwrap().to_string_lossy(),
        "/tmp/crm-test/config.toml"
    );

    clear_db_env();
}

#[test]
#[serial]
fn test_missing_config_file_uses_defaults() {
    clear_db_env();
    let dir = TempDir::new().unwrap();
    env::set_var(CONFIG_PATH_ENV, dir.path().join("absent.toml"));

    let config = load_toml_config();

    assert!(config.database.host.is_none());
    assert_eq!(config.logging.level, "info");

    clear_db_env();
}

#[test]
#[serial]
fn test_malformed_config_file_is_ignored() {
    clear_db_env();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[database\nhost = ").unwrap();
    env::set_var(CONFIG_PATH_ENV, &path);

    assert!(load_toml_config_from(&path).is_err());
    let config = load_toml_config();
    assert!(config.database.host.is_none());

    clear_db_env();
}

#[test]
#[serial]
fn test_config_file_is_loaded() {
    clear_db_env();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[database]\nhost = \"file-host\"\n\n[logging]\nlevel = \"debug\"\n",
    )
    .unwrap();
    env::set_var(CONFIG_PATH_ENV, &path);

    let config = load_toml_config();
    let resolved = DatabaseConfig::resolve(&DatabaseOverrides::default(), &config);

    assert_eq!(resolved.host, "file-host");
    assert_eq!(config.logging.level, "debug");

    clear_db_env();
}

//! Tests for configuration resolution
//!
//! Tests that touch SONGBOOK_ROOT_FOLDER are marked #[serial] so they don't
//! race on the process environment.

use serial_test::serial;
use songbook_common::config::{
    AppConfig, ConfigOverrides, TomlConfig, DEFAULT_BIND_ADDRESS, DEFAULT_PORT, ROOT_FOLDER_ENV,
};
use std::env;
use std::path::PathBuf;

fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
#[serial]
fn test_toml_values_used_when_no_overrides() {
    env::remove_var(ROOT_FOLDER_ENV);
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
        root_folder = "/tmp/songbook-toml"
        port = 9000
        bind_address = "0.0.0.0"
        session_ttl_hours = 12
        password_cost = 5
        "#,
    );

    let config = AppConfig::resolve(ConfigOverrides {
        config_file: Some(path),
        ..Default::default()
    });

    assert_eq!(config.root_folder, PathBuf::from("/tmp/songbook-toml"));
    assert_eq!(config.port, 9000);
    assert_eq!(config.bind_address, "0.0.0.0");
    assert_eq!(config.session_ttl_hours, 12);
    assert_eq!(config.password_cost, 5);
}

#[test]
#[serial]
fn test_env_var_beats_toml_root_folder() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "root_folder = \"/tmp/songbook-toml\"\n");
    env::set_var(ROOT_FOLDER_ENV, "/tmp/songbook-env");

    let config = AppConfig::resolve(ConfigOverrides {
        config_file: Some(path),
        ..Default::default()
    });
    env::remove_var(ROOT_FOLDER_ENV);

    assert_eq!(config.root_folder, PathBuf::from("/tmp/songbook-env"));
}

#[test]
#[serial]
fn test_cli_beats_env_root_folder() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/songbook-env");

    let config = AppConfig::resolve(ConfigOverrides {
        root_folder: Some(PathBuf::from("/tmp/songbook-cli")),
        config_file: Some(PathBuf::from("/nonexistent/config.toml")),
        ..Default::default()
    });
    env::remove_var(ROOT_FOLDER_ENV);

    assert_eq!(config.root_folder, PathBuf::from("/tmp/songbook-cli"));
}

#[test]
#[serial]
fn test_invalid_toml_falls_back_to_defaults() {
    env::remove_var(ROOT_FOLDER_ENV);
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "port = \"not a number\"\n[[[");

    let config = AppConfig::resolve(ConfigOverrides {
        config_file: Some(path),
        ..Default::default()
    });

    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
}

#[test]
fn test_toml_load_reports_parse_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "port = -1\n");

    assert!(TomlConfig::load(&path).is_err());
}

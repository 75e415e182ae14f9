use std::fs;
use std::path::PathBuf;

use idxsite::config::{Config, ConfigError, ConfigStore};
use tempfile::TempDir;

fn write_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, content).expect("Failed to write config");
    (temp_dir, path)
}

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.server.bind_addr, "127.0.0.1:3000");
    assert_eq!(config.server.default_page_size, 20);
    assert_eq!(config.server.max_page_size, 100);
    assert!(config.storage.path.is_none());
    assert_eq!(config.storage.favorites_key, "favorites");
    assert_eq!(config.logging.level, "info");
    assert!(config.logging.file.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("idxsite/config.toml"));
}

#[test]
fn test_missing_file_gives_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_from(&temp_dir.path().join("nope.toml")).unwrap();
    assert_eq!(config.server.bind_addr, "127.0.0.1:3000");
}

#[test]
fn test_partial_file_fills_defaults() {
    let (_dir, path) = write_config(
        r#"
[server]
bind_addr = "0.0.0.0:8080"

[storage]
path = "/var/lib/idxsite/storage.json"
"#,
    );

    let config = Config::load_from(&path).unwrap();

    assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
    assert_eq!(config.server.default_page_size, 20);
    assert_eq!(
        config.storage_path(),
        PathBuf::from("/var/lib/idxsite/storage.json")
    );
    assert_eq!(config.storage.favorites_key, "favorites");
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_storage_path_defaults_to_data_dir() {
    let config = Config::default();
    assert!(config.storage_path().ends_with("idxsite/storage.json"));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let (_dir, path) = write_config("[server\nbind_addr = ");
    let result = Config::load_from(&path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn test_wrong_type_is_parse_error() {
    let (_dir, path) = write_config("[server]\ndefault_page_size = \"twenty\"\n");
    let result = Config::load_from(&path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn test_invalid_bind_addr_rejected() {
    let (_dir, path) = write_config("[server]\nbind_addr = \"localhost\"\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
    assert!(err.to_string().contains("localhost"));
}

#[test]
fn test_empty_favorites_key_rejected() {
    let mut config = Config::default();
    config.storage.favorites_key = "  ".to_string();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn test_page_size_bounds() {
    let mut config = Config::default();
    config.server.default_page_size = 0;
    assert!(config.validate().is_err());

    config.server.default_page_size = 50;
    config.server.max_page_size = 10;
    assert!(config.validate().is_err());

    config.server.max_page_size = 50;
    assert!(config.validate().is_ok());
}

#[test]
fn test_invalid_log_level_rejected() {
    let mut config = Config::default();
    config.logging.level = "idxsite=notalevel".to_string();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError { .. })
    ));

    config.logging.level = "warn,idxsite=debug".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_store_reload() {
    let (_dir, path) = write_config("[server]\nbind_addr = \"127.0.0.1:4000\"\n");
    let store = ConfigStore::open(path.clone()).unwrap();
    assert_eq!(store.get().server.bind_addr, "127.0.0.1:4000");

    fs::write(&path, "[server]\nbind_addr = \"127.0.0.1:4001\"\n").unwrap();
    store.reload().unwrap();
    assert_eq!(store.get().server.bind_addr, "127.0.0.1:4001");

    // A broken file keeps the previous config.
    fs::write(&path, "[server]\nbind_addr = \"nope\"\n").unwrap();
    assert!(store.reload().is_err());
    assert_eq!(store.get().server.bind_addr, "127.0.0.1:4001");
    assert_eq!(store.path(), path.as_path());
}

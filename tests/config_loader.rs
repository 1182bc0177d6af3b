mod common;

use std::collections::HashMap;

use turfdesk::config::{Config, ConfigError, BASE_URL_ENV};

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.api.base_url, "http://localhost:3000");
    assert_eq!(config.api.timeout_seconds, 30);
    assert_eq!(config.api.connect_timeout_seconds, 5);
    assert_eq!(config.auth.redirect_path, "/auth");
    assert!(config.auth.token.is_none());
    assert!(config.auth.storage_path.is_none());
    assert_eq!(config.search.debounce_ms, 300);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("turfdesk/config.toml"));
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let (_dir, path) = common::temp_config(
        r#"
[api]
base_url = "https://api.turfs.example"

[search]
debounce_ms = 150
"#,
    );
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.api.base_url, "https://api.turfs.example");
    assert_eq!(config.api.timeout_seconds, 30);
    assert_eq!(config.search.debounce_ms, 150);
    assert_eq!(config.auth.redirect_path, "/auth");
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let (_dir, path) = common::temp_config("[api\nbase_url = ");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_empty_base_url_fails_validation() {
    let (_dir, path) = common::temp_config("[api]\nbase_url = \"\"\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
}

#[test]
fn test_zero_debounce_fails_validation() {
    let (_dir, path) = common::temp_config("[search]\ndebounce_ms = 0\n");
    let err = Config::load_from(&path).unwrap_err();
    match err {
        ConfigError::ValidationError { message } => assert!(message.contains("debounce_ms")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_redirect_path_must_be_route() {
    let mut config = Config::default();
    config.auth.redirect_path = "auth".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_env_override_wins() {
    let (_dir, path) = common::temp_config("[api]\nbase_url = \"http://from-file:1\"\n");
    let mut config = Config::load_from(&path).unwrap();

    let env: HashMap<&str, &str> = [(BASE_URL_ENV, "http://from-env:2")].into_iter().collect();
    config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

    assert_eq!(config.api.base_url, "http://from-env:2");
    assert!(config.validate().is_ok());
}

#[test]
fn test_blank_env_override_is_ignored() {
    let mut config = Config::default();
    config.apply_env_overrides(|key| (key == BASE_URL_ENV).then(|| "  ".to_string()));
    assert_eq!(config.api.base_url, "http://localhost:3000");
}

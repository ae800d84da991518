// Config loading and validation tests

use dockwatch::config::AppConfig;

const VALID_CONFIG: &str = r#"
[server]
port = 5005
host = "0.0.0.0"
api_key = "123abc"

[watcher]
default_endpoint = "http://127.0.0.1:5005/stats?api_key=123abc"
poll_interval_ms = 5000
request_timeout_ms = 5000
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 5005);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.api_key, "123abc");
    assert_eq!(
        config.watcher.default_endpoint,
        "http://127.0.0.1:5005/stats?api_key=123abc"
    );
    assert_eq!(config.watcher.poll_interval_ms, 5000);
    assert_eq!(config.watcher.request_timeout_ms, 5000);
}

#[test]
fn test_config_intervals_default_when_omitted() {
    let trimmed = VALID_CONFIG
        .replace("poll_interval_ms = 5000", "")
        .replace("request_timeout_ms = 5000", "");
    let config = AppConfig::load_from_str(&trimmed).expect("valid");
    assert_eq!(config.watcher.poll_interval_ms, 5000);
    assert_eq!(config.watcher.request_timeout_ms, 5000);
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 5005", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_empty_api_key() {
    let bad = VALID_CONFIG.replace("api_key = \"123abc\"", "api_key = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("api_key"));
}

#[test]
fn test_config_validation_rejects_empty_default_endpoint() {
    let bad = VALID_CONFIG.replace(
        "default_endpoint = \"http://127.0.0.1:5005/stats?api_key=123abc\"",
        "default_endpoint = \"\"",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("default_endpoint"));
}

#[test]
fn test_config_validation_rejects_poll_interval_zero() {
    let bad = VALID_CONFIG.replace("poll_interval_ms = 5000", "poll_interval_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("poll_interval_ms"));
}

#[test]
fn test_config_validation_rejects_request_timeout_zero() {
    let bad = VALID_CONFIG.replace("request_timeout_ms = 5000", "request_timeout_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("request_timeout_ms"));
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_load_from_file_via_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    unsafe { std::env::set_var("CONFIG_FILE", path.to_str().unwrap()) };
    let result = AppConfig::load();
    unsafe { std::env::remove_var("CONFIG_FILE") };
    let config = result.expect("load from CONFIG_FILE");
    assert_eq!(config.server.port, 5005);
    assert_eq!(config.server.api_key, "123abc");
}

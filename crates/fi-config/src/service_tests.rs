use super::*;
use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_default_config() {
    let config = ServiceConfig::default();
    assert_eq!(config.notion.base_url, "https://api.notion.com/v1");
    assert_eq!(config.notion.notion_version, "2022-06-28");
    assert_eq!(config.notion.page_size, 100);
    assert_eq!(config.server.port, 8888);
    assert!(config.server.expose_error_details);
    assert!(config.notion.api_key.is_empty());
}

#[test]
fn test_parse_partial_toml_fills_defaults() {
    let toml_str = r#"
[notion]
database_id = "db-123"
page_size = 50

[server]
port = 9000
"#;
    let config: ServiceConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(config.notion.database_id, "db-123");
    assert_eq!(config.notion.page_size, 50);
    assert_eq!(config.notion.base_url, "https://api.notion.com/v1");
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.bind, "127.0.0.1");
}

#[test]
fn test_load_from_missing_file_returns_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = ServiceConfig::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, ServiceConfig::default());
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[notion]\napi_key = \"secret_file\"\ndatabase_id = \"db-file\"\n",
    )
    .unwrap();

    let config = ServiceConfig::load_from(&path).unwrap();
    assert_eq!(config.notion.api_key, "secret_file");
    assert_eq!(config.notion.database_id, "db-file");
}

#[test]
fn test_load_from_invalid_toml_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[notion\napi_key = ").unwrap();

    let err = ServiceConfig::load_from(&path).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse config"));
}

#[test]
fn test_env_overrides_file_values() {
    let mut config = ServiceConfig::default();
    config.notion.api_key = "from-file".to_string();

    config.apply_env_overrides(env_from(&[
        (ENV_API_KEY, "from-env"),
        (ENV_DATABASE_ID, "db-env"),
        (ENV_BIND, "0.0.0.0"),
        (ENV_PORT, "7777"),
    ]));

    assert_eq!(config.notion.api_key, "from-env");
    assert_eq!(config.notion.database_id, "db-env");
    assert_eq!(config.server.bind, "0.0.0.0");
    assert_eq!(config.server.port, 7777);
}

#[test]
fn test_empty_env_values_are_ignored() {
    let mut config = ServiceConfig::default();
    config.notion.database_id = "db-file".to_string();

    config.apply_env_overrides(env_from(&[(ENV_DATABASE_ID, "  ")]));

    assert_eq!(config.notion.database_id, "db-file");
}

#[test]
fn test_invalid_port_env_is_ignored() {
    let mut config = ServiceConfig::default();
    config.apply_env_overrides(env_from(&[(ENV_PORT, "not-a-port")]));
    assert_eq!(config.server.port, 8888);
}

#[test]
fn test_validate_requires_credentials() {
    let config = ServiceConfig::default();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains(ENV_API_KEY));

    let mut config = ServiceConfig::default();
    config.notion.api_key = "secret".to_string();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains(ENV_DATABASE_ID));

    config.notion.database_id = "db".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_page_size_out_of_range() {
    let mut config = ServiceConfig::default();
    config.notion.api_key = "secret".to_string();
    config.notion.database_id = "db".to_string();

    config.notion.page_size = 0;
    assert!(config.validate().is_err());
    config.notion.page_size = 101;
    assert!(config.validate().is_err());
}

#[test]
fn test_redacted_masks_api_key() {
    let mut config = ServiceConfig::default();
    config.notion.api_key = "secret_abc".to_string();

    let shown = config.to_display_toml().unwrap();
    assert!(!shown.contains("secret_abc"));
    assert!(shown.contains("***"));
    assert_eq!(config.notion.api_key, "secret_abc");
}

#[test]
fn test_default_template_parses() {
    let template = ServiceConfig::default_template();
    let config: ServiceConfig = toml::from_str(&template).unwrap();
    assert_eq!(config.notion.page_size, 100);
    assert!(template.contains(ENV_API_KEY));
}

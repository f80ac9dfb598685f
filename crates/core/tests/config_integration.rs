//! 설정 파일 통합 테스트
//!
//! - elastic-integration.toml.example 파싱 테스트
//! - 지정 키 집합 보존 테스트
//! - 환경변수 우선순위 테스트
//! - 빈 파일 / 잘못된 형식 에러 테스트

use std::io::Write;

use elastic_integration_core::config::IntegrationConfig;
use elastic_integration_core::error::{ConfigError, IntegrationError};

const EXAMPLE: &str = include_str!("../../../elastic-integration.toml.example");

// =============================================================================
// 예시 파일 파싱 테스트
// =============================================================================

#[test]
fn example_config_parses_successfully() {
    let config = IntegrationConfig::parse(EXAMPLE).expect("example config should parse");

    assert_eq!(config.general.log_level, "info");
    assert_eq!(config.general.log_format, "json");
    config
        .validate()
        .expect("example config should pass validation");
}

#[test]
fn example_config_supplies_only_uncommented_keys() {
    let config = IntegrationConfig::parse(EXAMPLE).expect("should parse");
    let supplied: Vec<_> = config
        .elastic_integration
        .supplied()
        .iter()
        .copied()
        .collect();

    assert_eq!(supplied, vec!["api_key", "hosts", "ssl_verification_mode"]);
}

#[test]
fn example_config_keeps_api_key_secret() {
    let config = IntegrationConfig::parse(EXAMPLE).expect("should parse");
    let api_key = config
        .elastic_integration
        .options()
        .api_key
        .as_ref()
        .expect("api_key present");

    assert_eq!(api_key.expose(), "my-key-id:my-key-secret");
    assert!(!format!("{config:?}").contains("my-key-secret"));
}

// =============================================================================
// 부분 설정 테스트
// =============================================================================

#[test]
fn general_only_config_leaves_connection_options_empty() {
    let toml = r#"
[general]
log_level = "debug"
"#;
    let config = IntegrationConfig::parse(toml).expect("should parse");

    assert_eq!(config.general.log_level, "debug");
    assert_eq!(config.general.log_format, "json");
    assert!(config.elastic_integration.supplied().is_empty());
}

#[test]
fn explicit_false_is_still_supplied() {
    let toml = r#"
[elastic_integration]
cloud_id = "x"
ssl_enabled = false
"#;
    let config = IntegrationConfig::parse(toml).expect("should parse");

    assert!(config.elastic_integration.is_supplied("ssl_enabled"));
    assert_eq!(config.elastic_integration.options().ssl_enabled, Some(false));
}

#[test]
fn empty_strings_are_kept_as_supplied_values() {
    let toml = r#"
[elastic_integration]
cloud_id = ""
username = ""
"#;
    let config = IntegrationConfig::parse(toml).expect("should parse");
    let options = config.elastic_integration.options();

    assert_eq!(options.cloud_id.as_deref(), Some(""));
    assert_eq!(options.username.as_deref(), Some(""));
    assert!(config.elastic_integration.is_supplied("username"));
}

// =============================================================================
// 환경변수 우선순위 테스트
// =============================================================================

#[test]
#[serial_test::serial]
fn env_override_takes_precedence_over_toml() {
    let toml = r#"
[general]
log_level = "info"
"#;

    let original = std::env::var("ELASTIC_INTEGRATION_GENERAL_LOG_LEVEL").ok();
    // SAFETY: serial_test로 직렬화되어 환경변수 조작이 안전합니다.
    unsafe {
        std::env::set_var("ELASTIC_INTEGRATION_GENERAL_LOG_LEVEL", "error");
    }

    let mut config = IntegrationConfig::parse(toml).expect("should parse");
    config.apply_env_overrides();
    let result = config.general.log_level.clone();

    // SAFETY: 테스트 정리
    unsafe {
        match original {
            Some(val) => std::env::set_var("ELASTIC_INTEGRATION_GENERAL_LOG_LEVEL", val),
            None => std::env::remove_var("ELASTIC_INTEGRATION_GENERAL_LOG_LEVEL"),
        }
    }

    assert_eq!(result, "error");
}

#[test]
#[serial_test::serial]
fn env_override_does_not_touch_connection_options() {
    let toml = r#"
[elastic_integration]
hosts = ["a"]
"#;

    // SAFETY: serial_test로 직렬화되어 환경변수 조작이 안전합니다.
    unsafe {
        std::env::set_var("ELASTIC_INTEGRATION_ELASTIC_INTEGRATION_HOSTS", "b");
    }

    let mut config = IntegrationConfig::parse(toml).expect("should parse");
    config.apply_env_overrides();

    // SAFETY: 테스트 정리
    unsafe {
        std::env::remove_var("ELASTIC_INTEGRATION_ELASTIC_INTEGRATION_HOSTS");
    }

    assert_eq!(
        config.elastic_integration.options().hosts,
        Some(vec!["a".to_owned()])
    );
}

#[tokio::test]
#[serial_test::serial]
async fn load_rejects_invalid_format_from_env() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[general]\nlog_format = \"json\"").expect("write config");

    // SAFETY: serial_test로 직렬화되어 환경변수 조작이 안전합니다.
    unsafe {
        std::env::set_var("ELASTIC_INTEGRATION_GENERAL_LOG_FORMAT", "xml");
    }

    let result = IntegrationConfig::load(file.path()).await;

    // SAFETY: 테스트 정리
    unsafe {
        std::env::remove_var("ELASTIC_INTEGRATION_GENERAL_LOG_FORMAT");
    }

    assert!(matches!(
        result,
        Err(IntegrationError::Config(ConfigError::InvalidValue { ref field, .. }))
            if field == "general.log_format"
    ));
}

// =============================================================================
// 에러 케이스 테스트
// =============================================================================

#[test]
fn comments_only_parses_with_defaults() {
    let config = IntegrationConfig::parse("# nothing here\n").expect("should parse");
    assert_eq!(config.general.log_level, "info");
}

#[test]
fn malformed_toml_returns_parse_error() {
    let result = IntegrationConfig::parse("[elastic_integration\nhosts = ");
    assert!(matches!(
        result,
        Err(IntegrationError::Config(ConfigError::ParseFailed { .. }))
    ));
}

#[test]
fn misspelled_option_returns_parse_error_naming_it() {
    let err = IntegrationConfig::parse("[elastic_integration]\nssl_verfication_mode = \"full\"")
        .expect_err("unknown key must fail");
    assert!(err.to_string().contains("ssl_verfication_mode"));
}

#[test]
fn non_string_host_returns_parse_error() {
    let result = IntegrationConfig::parse("[elastic_integration]\nhosts = [9200]");
    assert!(matches!(
        result,
        Err(IntegrationError::Config(ConfigError::ParseFailed { .. }))
    ));
}

#[tokio::test]
async fn from_file_nonexistent_returns_file_not_found() {
    let result =
        IntegrationConfig::from_file("/tmp/elastic_integration_test_nonexistent_12345.toml").await;
    assert!(matches!(
        result,
        Err(IntegrationError::Config(ConfigError::FileNotFound { .. }))
    ));
}

#[tokio::test]
#[serial_test::serial]
async fn load_example_config_from_disk() {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let example_path = format!("{manifest_dir}/../../elastic-integration.toml.example");

    let config = IntegrationConfig::load(&example_path)
        .await
        .expect("example should load");
    assert!(config.elastic_integration.is_supplied("hosts"));
}

//! 검증 파이프라인 통합 테스트
//!
//! TOML 설정 문자열에서 시작해 `ConnectionValidator`까지 전체 경로를 검증합니다.

use std::path::Path;

use elastic_integration_connection::{
    AuthState, ConnectionValidator, PathProbe, SystemTrust, TrustMaterial, ValidationError,
    ValidationWarning, VerificationMode,
};
use elastic_integration_core::config::IntegrationConfig;
use elastic_integration_core::error::{ErrorKind, IntegrationError};

struct AllowAll;

impl PathProbe for AllowAll {
    fn is_readable(&self, _: &Path) -> bool {
        true
    }
    fn is_writable(&self, _: &Path) -> bool {
        false
    }
}

fn validator() -> ConnectionValidator {
    ConnectionValidator::builder()
        .path_probe(AllowAll)
        .system_trust(SystemTrust::Available("/etc/ssl/certs/ca-certificates.crt".into()))
        .build()
}

fn validate(toml: &str) -> Result<elastic_integration_connection::Validated, ValidationError> {
    let config = IntegrationConfig::parse(toml).expect("config should parse");
    validator().validate(&config.elastic_integration)
}

#[test]
fn schemeless_hosts_are_normalized_to_https() {
    let validated = validate(
        r#"
[elastic_integration]
hosts = ["127.0.0.1", "127.0.0.2:9300"]
api_key = "id:secret"
"#,
    )
    .unwrap();

    let hosts: Vec<String> = validated
        .config
        .hosts()
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(hosts, vec!["https://127.0.0.1:9200/", "https://127.0.0.2:9300/"]);
    assert!(validated.config.ssl_enabled());
    assert_eq!(
        validated.config.tls().verification_mode(),
        Some(VerificationMode::Full)
    );
    assert!(validated.warnings.is_empty());
}

#[test]
fn mixed_protocols_are_rejected() {
    let err = validate(
        r#"
[elastic_integration]
hosts = ["http://a:1111", "https://b:2222"]
"#,
    )
    .unwrap_err();
    assert_eq!(err, ValidationError::MixedProtocols);
    assert_eq!(err.kind(), ErrorKind::MixedProtocols);
}

#[test]
fn cloud_id_with_ssl_disabled_is_disallowed() {
    let err = validate(
        r#"
[elastic_integration]
cloud_id = "x"
ssl_enabled = false
"#,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisallowedOption);
    assert!(err.to_string().contains("cloud_id"));
}

#[test]
fn username_without_password_requires_password() {
    let err = validate(
        r#"
[elastic_integration]
hosts = ["es.local"]
username = "u"
"#,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IncompleteDependency);
    assert!(err.to_string().contains("`password`"));
}

#[test]
fn unverified_cloud_target_succeeds_with_warnings() {
    let validated = validate(
        r#"
[elastic_integration]
cloud_id = "deployment:abc"
ssl_enabled = true
ssl_verification_mode = "none"
"#,
    )
    .unwrap();

    match validated.config.tls() {
        elastic_integration_connection::TlsState::Enabled {
            verification_mode,
            identity,
            trust,
        } => {
            assert_eq!(*verification_mode, VerificationMode::None);
            assert!(identity.is_none());
            assert_eq!(*trust, TrustMaterial::Unverified);
        }
        other => panic!("expected TLS enabled, got {other:?}"),
    }
    assert_eq!(
        validated.warnings,
        vec![
            ValidationWarning::VerificationDisabled,
            ValidationWarning::NoCredentials
        ]
    );
}

#[test]
fn unverified_mode_without_system_trust_still_succeeds() {
    let config = IntegrationConfig::parse(
        r#"
[elastic_integration]
cloud_id = "deployment:abc"
ssl_verification_mode = "none"
api_key = "k"
"#,
    )
    .unwrap();
    let validator = ConnectionValidator::builder()
        .path_probe(AllowAll)
        .system_trust(SystemTrust::Unavailable)
        .build();
    assert!(validator.validate(&config.elastic_integration).is_ok());
}

#[test]
fn full_mode_without_any_trust_fails() {
    let config = IntegrationConfig::parse(
        r#"
[elastic_integration]
hosts = ["es.local"]
"#,
    )
    .unwrap();
    let validator = ConnectionValidator::builder()
        .path_probe(AllowAll)
        .system_trust(SystemTrust::Unavailable)
        .build();
    let err = validator.validate(&config.elastic_integration).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingTrustMaterial);
}

#[test]
fn basic_credentials_over_http_warn() {
    let validated = validate(
        r#"
[elastic_integration]
hosts = ["http://es.local"]
username = "elastic"
password = "changeme"
"#,
    )
    .unwrap();
    assert!(!validated.config.ssl_enabled());
    assert_eq!(
        validated.config.hosts().unwrap()[0].to_string(),
        "http://es.local:9200/"
    );
    assert!(matches!(validated.config.auth(), AuthState::Basic { .. }));
    assert_eq!(validated.warnings, vec![ValidationWarning::CredentialsOverHttp]);
}

#[test]
fn hosts_with_different_paths_are_rejected() {
    let err = validate(
        r#"
[elastic_integration]
hosts = ["https://a/es", "https://b/other"]
"#,
    )
    .unwrap_err();
    assert_eq!(err, ValidationError::PathMismatch);
}

#[test]
fn validation_error_converts_to_config_rejection() {
    let err = validate("[elastic_integration]\n").unwrap_err();
    let top: IntegrationError = err.clone().into();
    assert!(top.to_string().contains(&err.to_string()));
}

#[test]
fn validated_config_serializes_without_secrets() {
    let validated = validate(
        r#"
[elastic_integration]
hosts = ["es.local"]
cloud_auth = "elastic:hunter2"
"#,
    )
    .unwrap();
    let json = serde_json::to_string(&validated.config).unwrap();
    assert!(!json.contains("hunter2"));
    assert!(json.contains("[REDACTED]"));
}

//! 연결 설정 검증 에러 타입
//!
//! [`ValidationError`]는 검증 엔진이 시작을 중단시키는 모든 사유를 나타냅니다.
//! 메시지는 문제가 된 옵션 이름을 백틱으로 감싸 그대로 운영자에게 노출됩니다.
//! `From<ValidationError> for IntegrationError` 구현으로
//! `ConfigError::Rejected`로 변환되며, 메시지와 분류([`ErrorKind`])가 보존됩니다.
//!
//! # 에러 카테고리
//!
//! - **연결 대상**: `BothConnectionModes`, `NoConnectionMode`, `EmptyCloudIdentifier`, `EmptyHostList`
//! - **호스트 목록**: `MixedProtocols`, `SchemeMismatch`, `PathMismatch`, `PrematureNormalization`, `InvalidHost`
//! - **옵션 조합**: `DisallowedOptions`, `VerificationModeForbids`, `ConflictingOptions`,
//!   `MultipleAuthMechanisms`, `MissingCompanion`, `OrphanOption`
//! - **빈 값**: `EmptyBasicCredential`, `EmptyCredential`, `EmptyPassphrase`
//! - **신뢰 자료**: `MissingTrustMaterial`, `EmptyCertificateAuthorities`
//! - **파일시스템**: `UnreadablePath`, `WritablePath`

use std::path::PathBuf;

use elastic_integration_core::error::{ConfigError, ErrorKind, IntegrationError};

/// 연결 설정 검증 에러
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("`hosts` and `cloud_id` cannot be used together.")]
    BothConnectionModes,

    #[error("Either `hosts` or `cloud_id` is required")]
    NoConnectionMode,

    #[error("Empty `cloud_id` is not allowed")]
    EmptyCloudIdentifier,

    #[error("Empty `hosts` is not allowed")]
    EmptyHostList,

    /// 호스트 문자열을 엔드포인트로 해석할 수 없음
    #[error("Invalid `hosts` entry `{host}`: {reason}")]
    InvalidHost { host: String, reason: String },

    #[error(
        "`hosts` contains entries with mixed protocols, which are unsupported; when any entry includes a protocol, the protocols of all must match each other"
    )]
    MixedProtocols,

    /// 호스트 스킴이 `ssl_enabled`와 맞지 않음
    #[error(
        "All hosts must agree with {scheme} schema when{} using `ssl_enabled`.",
        if *ssl_enabled { "" } else { " NOT" }
    )]
    SchemeMismatch { scheme: String, ssl_enabled: bool },

    #[error("All hosts must use same path.")]
    PathMismatch,

    #[error("`hosts` cannot be normalized with `ssl_enabled => nil`")]
    PrematureNormalization,

    /// TLS가 꺼진 상태에서 TLS 전용 옵션이 지정됨
    #[error("When SSL is disabled, the following provided parameters are not allowed: {options:?}")]
    DisallowedOptions { options: Vec<&'static str> },

    /// 검증 모드 `none`에서 신뢰 자료가 지정됨
    #[error("`{option}` requires `ssl_verification_mode` to be either `full` or `certificate`")]
    VerificationModeForbids { option: &'static str },

    #[error(
        "`ssl_truststore_password` requires `ssl_truststore_path` and `ssl_verification_mode` (either `full` or `certificate`)"
    )]
    TruststorePasswordWithoutVerification,

    /// 함께 쓸 수 없는 두 옵션
    #[error("`{first}` and `{second}` cannot be used together.")]
    ConflictingOptions {
        first: &'static str,
        second: &'static str,
    },

    /// 둘 이상의 인증 방식
    #[error(
        "Multiple authentication {options:?} options cannot be used together. Please provide ONLY one."
    )]
    MultipleAuthMechanisms { options: Vec<&'static str> },

    /// 짝 옵션 누락
    #[error("`{option}` requires `{requires}`")]
    MissingCompanion {
        option: &'static str,
        requires: &'static str,
    },

    /// 전제 옵션 없이 지정된 옵션
    #[error("`{option}` is not allowed unless `{requires}` is specified")]
    OrphanOption {
        option: &'static str,
        requires: &'static str,
    },

    #[error("Empty `username` or `password` is not allowed")]
    EmptyBasicCredential,

    #[error("Empty `{option}` is not allowed")]
    EmptyCredential { option: &'static str },

    #[error("`{option}` cannot be empty")]
    EmptyPassphrase { option: &'static str },

    #[error(
        "`cloud_auth` must be in the form `<username>:<password>` with a non-empty username and password"
    )]
    InvalidCloudAuth,

    #[error(
        "Invalid `ssl_verification_mode` value `{value}`; expected one of `full`, `certificate`, `none`"
    )]
    InvalidVerificationMode { value: String },

    #[error("Empty `id` is not allowed")]
    EmptyIdentity,

    #[error("`ssl_certificate_authorities` cannot be empty")]
    EmptyCertificateAuthorities,

    /// 검증 모드가 신뢰 자료를 요구하지만 어디에도 없음
    #[error(
        "`ssl_verification_mode => {mode}` requires `ssl_truststore_path` or `ssl_certificate_authorities` because no system trust store is available"
    )]
    MissingTrustMaterial { mode: &'static str },

    #[error("Specified {label} {} path must be readable.", path.display())]
    UnreadablePath { label: &'static str, path: PathBuf },

    #[error("Specified {label} {} path must not be writable.", path.display())]
    WritablePath { label: &'static str, path: PathBuf },
}

impl ValidationError {
    /// 운영자에게 보여줄 실패 분류
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BothConnectionModes => ErrorKind::BothConnectionModes,
            Self::NoConnectionMode => ErrorKind::NoConnectionMode,
            Self::EmptyCloudIdentifier => ErrorKind::EmptyCloudIdentifier,
            Self::EmptyHostList => ErrorKind::EmptyHostList,
            Self::MixedProtocols => ErrorKind::MixedProtocols,
            Self::SchemeMismatch { .. } => ErrorKind::SchemeMismatch,
            Self::PathMismatch => ErrorKind::PathMismatch,
            Self::PrematureNormalization => ErrorKind::PrematureNormalization,
            Self::DisallowedOptions { .. }
            | Self::VerificationModeForbids { .. }
            | Self::TruststorePasswordWithoutVerification => ErrorKind::DisallowedOption,
            Self::ConflictingOptions { .. } | Self::MultipleAuthMechanisms { .. } => {
                ErrorKind::MutualExclusion
            }
            Self::MissingCompanion { .. } | Self::OrphanOption { .. } => {
                ErrorKind::IncompleteDependency
            }
            Self::EmptyBasicCredential | Self::EmptyCredential { .. } => ErrorKind::EmptyCredential,
            Self::EmptyPassphrase { .. } => ErrorKind::EmptyPassphrase,
            Self::MissingTrustMaterial { .. } | Self::EmptyCertificateAuthorities => {
                ErrorKind::MissingTrustMaterial
            }
            Self::UnreadablePath { .. } => ErrorKind::UnreadablePath,
            Self::WritablePath { .. } => ErrorKind::WritablePath,
            Self::InvalidHost { .. }
            | Self::InvalidCloudAuth
            | Self::InvalidVerificationMode { .. }
            | Self::EmptyIdentity => ErrorKind::InvalidValue,
        }
    }
}

impl From<ValidationError> for ConfigError {
    fn from(err: ValidationError) -> Self {
        ConfigError::Rejected {
            kind: err.kind(),
            reason: err.to_string(),
        }
    }
}

impl From<ValidationError> for IntegrationError {
    fn from(err: ValidationError) -> Self {
        IntegrationError::Config(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_mismatch_names_direction() {
        let enabled = ValidationError::SchemeMismatch {
            scheme: "https".to_owned(),
            ssl_enabled: true,
        };
        let disabled = ValidationError::SchemeMismatch {
            scheme: "http".to_owned(),
            ssl_enabled: false,
        };
        assert_eq!(
            enabled.to_string(),
            "All hosts must agree with https schema when using `ssl_enabled`."
        );
        assert_eq!(
            disabled.to_string(),
            "All hosts must agree with http schema when NOT using `ssl_enabled`."
        );
    }

    #[test]
    fn disallowed_options_lists_keys() {
        let err = ValidationError::DisallowedOptions {
            options: vec!["cloud_id", "ssl_key"],
        };
        assert_eq!(
            err.to_string(),
            "When SSL is disabled, the following provided parameters are not allowed: [\"cloud_id\", \"ssl_key\"]"
        );
        assert_eq!(err.kind(), ErrorKind::DisallowedOption);
    }

    #[test]
    fn multiple_auth_mechanisms_names_each_option() {
        let err = ValidationError::MultipleAuthMechanisms {
            options: vec!["username", "api_key"],
        };
        let msg = err.to_string();
        assert!(msg.contains("\"username\""));
        assert!(msg.contains("\"api_key\""));
        assert_eq!(err.kind(), ErrorKind::MutualExclusion);
    }

    #[test]
    fn companion_messages_name_both_options() {
        let missing = ValidationError::MissingCompanion {
            option: "ssl_certificate",
            requires: "ssl_key",
        };
        let orphan = ValidationError::OrphanOption {
            option: "ssl_key",
            requires: "ssl_certificate",
        };
        assert_eq!(missing.to_string(), "`ssl_certificate` requires `ssl_key`");
        assert_eq!(
            orphan.to_string(),
            "`ssl_key` is not allowed unless `ssl_certificate` is specified"
        );
        assert_eq!(missing.kind(), ErrorKind::IncompleteDependency);
    }

    #[test]
    fn path_errors_include_label_and_path() {
        let err = ValidationError::WritablePath {
            label: "ssl_key",
            path: PathBuf::from("/tmp/key.pem"),
        };
        assert_eq!(
            err.to_string(),
            "Specified ssl_key /tmp/key.pem path must not be writable."
        );
    }

    #[test]
    fn converts_into_rejected_config_error() {
        let err: IntegrationError = ValidationError::EmptyHostList.into();
        match err {
            IntegrationError::Config(config) => {
                assert_eq!(config.kind(), Some(ErrorKind::EmptyHostList));
                assert_eq!(config.to_string(), "Empty `hosts` is not allowed");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

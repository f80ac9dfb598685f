//! 필터 에러 타입
//!
//! [`FilterError`]는 필터 생명주기에서 발생하는 모든 실패를 표현합니다.
//! `From<FilterError> for IntegrationError` 변환으로 상위 레이어에 전파됩니다.

use elastic_integration_connection::ValidationError;
use elastic_integration_core::error::{
    ClientError, ConfigError, EngineError, IntegrationError, PreflightError,
};

use crate::filter::FilterState;

/// 필터 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// 연결 설정 검증 실패
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// 클라이언트 생성 실패
    #[error(transparent)]
    Client(#[from] ClientError),

    /// 보강 엔진 생성 또는 처리 실패
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// 사전 점검 실패 (메시지를 그대로 노출)
    #[error("{0}")]
    Preflight(#[from] PreflightError),

    /// 보안이 꺼진 클러스터에 자격 증명을 보내려 함
    #[error(
        "The Elasticsearch cluster does not have security features enabled but request credentials were provided. Either enable security in Elasticsearch (recommended!) or remove the {credentials} request credentials. {detail}"
    )]
    SecurityDisabledWithCredentials {
        credentials: &'static str,
        detail: String,
    },

    /// 단일 이벤트 처리는 지원하지 않음
    #[error("`filter` is not allowed. Use `multi_filter`")]
    SingleEventUnsupported,

    /// 현재 상태에서 허용되지 않는 호출
    #[error("filter is {actual}, expected {expected}")]
    InvalidState {
        actual: FilterState,
        expected: FilterState,
    },
}

impl From<FilterError> for IntegrationError {
    fn from(err: FilterError) -> Self {
        match err {
            FilterError::Validation(err) => err.into(),
            FilterError::Client(err) => IntegrationError::Client(err),
            FilterError::Engine(err) => IntegrationError::Engine(err),
            FilterError::Preflight(err) => IntegrationError::Preflight(err),
            err @ FilterError::SecurityDisabledWithCredentials { .. } => {
                IntegrationError::Config(ConfigError::Fatal(err.to_string()))
            }
            err @ (FilterError::SingleEventUnsupported | FilterError::InvalidState { .. }) => {
                IntegrationError::Engine(EngineError::Process(err.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn security_disabled_message_names_credentials() {
        let err = FilterError::SecurityDisabledWithCredentials {
            credentials: "`api_key`",
            detail: "no handler found".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with(
            "The Elasticsearch cluster does not have security features enabled"
        ));
        assert!(msg.contains("remove the `api_key` request credentials."));
        assert!(msg.ends_with("no handler found"));
    }

    #[test]
    fn security_disabled_converts_to_fatal_config_error() {
        let err: IntegrationError = FilterError::SecurityDisabledWithCredentials {
            credentials: "`cloud_auth`",
            detail: String::new(),
        }
        .into();
        assert!(matches!(err, IntegrationError::Config(ConfigError::Fatal(_))));
    }

    #[test]
    fn validation_error_keeps_rejection_kind() {
        let err: IntegrationError = FilterError::from(ValidationError::EmptyHostList).into();
        match err {
            IntegrationError::Config(config) => {
                assert_eq!(
                    config.kind(),
                    Some(elastic_integration_core::ErrorKind::EmptyHostList)
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_state_display() {
        let err = FilterError::InvalidState {
            actual: FilterState::Closed,
            expected: FilterState::Running,
        };
        assert_eq!(err.to_string(), "filter is closed, expected running");
    }
}

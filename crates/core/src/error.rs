//! 에러 타입: 도메인별 에러 정의
//!
//! [`IntegrationError`]는 필터 컴포넌트 전체의 최상위 에러입니다.
//! 각 크레이트는 자체 도메인 에러를 정의하고 `From` 구현으로
//! 이 타입으로 변환합니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 필터 컴포넌트 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum IntegrationError {
    /// 설정 관련 에러 (시작 중단 사유)
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 클라이언트 생성 에러
    #[error("client error: {0}")]
    Client(#[from] ClientError),

    /// 보강 엔진 에러
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    /// 사전 점검 에러
    #[error("preflight error: {0}")]
    Preflight(#[from] PreflightError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 검증 실패 분류
///
/// 구체적인 에러 타입이 아니라 운영자에게 보여줄 실패 범주입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// `hosts`와 `cloud_id`가 동시에 지정됨
    BothConnectionModes,
    /// `hosts`와 `cloud_id` 모두 없음
    NoConnectionMode,
    /// 빈 `cloud_id`
    EmptyCloudIdentifier,
    /// 빈 `hosts`
    EmptyHostList,
    /// 호스트 간 프로토콜 불일치 (TLS 추론 불가)
    MixedProtocols,
    /// 호스트 스킴이 TLS 설정과 불일치
    SchemeMismatch,
    /// 호스트 경로 불일치
    PathMismatch,
    /// TLS 확정 전 정규화 시도
    PrematureNormalization,
    /// 기능이 꺼진 상태에서 지정된 옵션
    DisallowedOption,
    /// 함께 쓸 수 없는 옵션 조합
    MutualExclusion,
    /// 짝 옵션 누락
    IncompleteDependency,
    /// 빈 자격 증명
    EmptyCredential,
    /// 빈 암호 문구
    EmptyPassphrase,
    /// 읽을 수 없는 경로
    UnreadablePath,
    /// 쓰기 가능한 경로
    WritablePath,
    /// 신뢰 자료 없음
    MissingTrustMaterial,
    /// 형식이 잘못된 값
    InvalidValue,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BothConnectionModes => "both_connection_modes",
            Self::NoConnectionMode => "no_connection_mode",
            Self::EmptyCloudIdentifier => "empty_cloud_identifier",
            Self::EmptyHostList => "empty_host_list",
            Self::MixedProtocols => "mixed_protocols",
            Self::SchemeMismatch => "scheme_mismatch",
            Self::PathMismatch => "path_mismatch",
            Self::PrematureNormalization => "premature_normalization",
            Self::DisallowedOption => "disallowed_option",
            Self::MutualExclusion => "mutual_exclusion",
            Self::IncompleteDependency => "incomplete_dependency",
            Self::EmptyCredential => "empty_credential",
            Self::EmptyPassphrase => "empty_passphrase",
            Self::UnreadablePath => "unreadable_path",
            Self::WritablePath => "writable_path",
            Self::MissingTrustMaterial => "missing_trust_material",
            Self::InvalidValue => "invalid_value",
        };
        f.write_str(name)
    }
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// 연결 설정 검증 거부. 메시지는 운영자에게 그대로 노출됩니다
    #[error("{reason}")]
    Rejected { kind: ErrorKind, reason: String },

    /// 시작 중 원격 클러스터 상태 때문에 드러난 설정 문제
    #[error("{0}")]
    Fatal(String),
}

impl ConfigError {
    /// 검증 거부 에러의 분류를 반환합니다.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Rejected { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// 클라이언트 생성 에러
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// 클라이언트 구성 실패
    #[error("failed to build client: {0}")]
    Build(String),

    /// TLS 컨텍스트 구성 실패
    #[error("failed to build TLS context: {0}")]
    Tls(String),
}

/// 보강 엔진 에러
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// 엔진 생성 실패
    #[error("configuration did not produce an EventProcessor: {0}")]
    Build(String),

    /// 배치 처리 실패
    #[error("batch processing failed: {0}")]
    Process(String),

    /// GeoIP 데이터베이스 에러
    #[error("geoip database error: {0}")]
    GeoIp(String),
}

/// 사전 점검(preflight) 에러
#[derive(Debug, thiserror::Error)]
pub enum PreflightError {
    /// 원격 클러스터의 보안 기능이 꺼져 있음
    #[error("no handler found for uri [/_security/user/_has_privileges]: {0}")]
    SecurityDisabled(String),

    /// 필요한 클러스터 권한 부족
    #[error("The cluster privilege `{privilege}` is REQUIRED in order to {reason}")]
    MissingPrivilege { privilege: String, reason: String },

    /// 라이선스 조회 실패 등 기타 점검 실패
    #[error("Preflight check failed: {0}")]
    Failed(String),
}

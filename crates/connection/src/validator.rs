//! 검증 파이프라인
//!
//! [`ConnectionValidator`]는 개별 검증기를 정해진 순서로 실행해
//! [`RawConfig`]를 [`ImmutableConnectionConfig`]로 바꿉니다.
//!
//! # 단계
//!
//! ```text
//! RawConfig
//!   -> validate_connection_settings   (hosts XOR cloud_id)
//!   -> infer_ssl_enabled              (ssl_enabled 미지정 시)
//!   -> validate_ssl                   (TlsState)
//!   -> validate_auth                  (AuthState)
//!   -> normalize_hosts                (스킴/포트/경로)
//!   -> ImmutableConnectionConfig
//! ```
//!
//! 각 단계는 이전 단계의 값을 받아 새 값을 돌려주며, 어느 단계든 실패하면
//! 부분 결과 없이 즉시 중단합니다.

use std::fmt;

use elastic_integration_core::config::RawConfig;
use tracing::{info, warn};

use crate::access::{FsPathProbe, PathProbe};
use crate::auth::validate_auth;
use crate::connection::{ConnectionTarget, validate_connection_settings};
use crate::error::ValidationError;
use crate::hosts::{infer_ssl_enabled, normalize_hosts};
use crate::immutable::ImmutableConnectionConfig;
use crate::tls::{SystemTrust, VerificationMode, validate_ssl};
use crate::warning::ValidationWarning;

/// 생성되는 컴포넌트 식별자 접두어
pub const GENERATED_ID_PREFIX: &str = "elastic_integration_";

/// 검증 성공 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    /// 최종 설정
    pub config: ImmutableConnectionConfig,
    /// 시작을 막지 않는 경고 (발생 순서)
    pub warnings: Vec<ValidationWarning>,
}

/// 연결 설정 검증기
pub struct ConnectionValidator {
    probe: Box<dyn PathProbe>,
    system_trust: SystemTrust,
}

impl ConnectionValidator {
    /// 실제 파일시스템과 시스템 신뢰 저장소를 쓰는 검증기를 생성합니다.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> ConnectionValidatorBuilder {
        ConnectionValidatorBuilder::new()
    }

    /// 검증 파이프라인을 실행합니다.
    pub fn validate(&self, raw: &RawConfig) -> Result<Validated, ValidationError> {
        let opts = raw.options();
        let target = validate_connection_settings(raw)?;
        let id = resolve_id(opts.id.as_deref())?;

        let ssl_enabled = match opts.ssl_enabled {
            Some(enabled) => enabled,
            None => {
                let inferred = infer_ssl_enabled(&target)?;
                info!(ssl_enabled = inferred, "`ssl_enabled` inferred from connection settings");
                inferred
            }
        };

        let tls = validate_ssl(raw, ssl_enabled, self.probe.as_ref(), &self.system_trust)?;
        let (auth, auth_warnings) = validate_auth(raw, ssl_enabled)?;

        let target = match target {
            ConnectionTarget::Hosts(hosts) => {
                ConnectionTarget::Hosts(normalize_hosts(&hosts, Some(ssl_enabled))?)
            }
            cloud => cloud,
        };

        let mut warnings = Vec::new();
        if tls.verification_mode() == Some(VerificationMode::None) {
            warnings.push(ValidationWarning::VerificationDisabled);
        }
        warnings.extend(auth_warnings);
        for warning in &warnings {
            warn!(id = id.as_str(), warning = warning.code(), "{}", warning.message());
        }

        let config = ImmutableConnectionConfig::builder(id, target)
            .tls(tls)
            .auth(auth)
            .pipeline_name(opts.pipeline_name.clone())
            .geoip_database_directory(opts.geoip_database_directory.clone())
            .build();

        info!(
            id = config.id(),
            ssl_enabled = config.ssl_enabled(),
            hosts = config.hosts().map_or(0, <[_]>::len),
            cloud_id = config.cloud_id().is_some(),
            "connection settings validated"
        );

        Ok(Validated { config, warnings })
    }
}

impl Default for ConnectionValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConnectionValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionValidator")
            .field("system_trust", &self.system_trust)
            .finish_non_exhaustive()
    }
}

/// [`ConnectionValidator`] 빌더
pub struct ConnectionValidatorBuilder {
    probe: Option<Box<dyn PathProbe>>,
    system_trust: Option<SystemTrust>,
}

impl ConnectionValidatorBuilder {
    pub fn new() -> Self {
        Self {
            probe: None,
            system_trust: None,
        }
    }

    /// 경로 권한 조회 방식을 지정합니다. 기본값은 [`FsPathProbe`]입니다.
    pub fn path_probe(mut self, probe: impl PathProbe + 'static) -> Self {
        self.probe = Some(Box::new(probe));
        self
    }

    /// 시스템 신뢰 저장소 가용성을 지정합니다. 기본값은 [`SystemTrust::detect`]입니다.
    pub fn system_trust(mut self, system_trust: SystemTrust) -> Self {
        self.system_trust = Some(system_trust);
        self
    }

    pub fn build(self) -> ConnectionValidator {
        ConnectionValidator {
            probe: self.probe.unwrap_or_else(|| Box::new(FsPathProbe)),
            system_trust: self.system_trust.unwrap_or_else(SystemTrust::detect),
        }
    }
}

impl Default for ConnectionValidatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 기본 검증기로 검증합니다.
pub fn validate(raw: &RawConfig) -> Result<Validated, ValidationError> {
    ConnectionValidator::new().validate(raw)
}

fn resolve_id(id: Option<&str>) -> Result<String, ValidationError> {
    match id {
        Some("") => Err(ValidationError::EmptyIdentity),
        Some(id) => Ok(id.to_owned()),
        None => Ok(format!(
            "{GENERATED_ID_PREFIX}{}",
            uuid::Uuid::new_v4().simple()
        )),
    }
}

//! 설정 관리: 필터 설정 파일 파싱
//!
//! [`IntegrationConfig`]는 설정 파일의 최상위 구조체이며,
//! `[general]` 섹션(로깅)과 `[elastic_integration]` 섹션(연결 옵션)으로 나뉩니다.
//!
//! 연결 옵션은 [`RawConfig`]로 읽힙니다. `RawConfig`는 값과 함께
//! 호출자가 실제로 지정한 키 집합을 보존하며, 읽은 뒤에는 변경되지 않습니다.
//! 기본값 적용과 정규화는 검증 엔진이 새 값을 만들어 수행합니다.
//!
//! # 설정 로딩 우선순위
//! 1. 환경변수 (`ELASTIC_INTEGRATION_GENERAL_LOG_LEVEL=debug` 형식, `[general]`만 해당)
//! 2. 설정 파일
//! 3. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), elastic_integration_core::error::IntegrationError> {
//! use elastic_integration_core::config::IntegrationConfig;
//!
//! let config = IntegrationConfig::load("elastic-integration.toml").await?;
//! assert!(config.elastic_integration.is_supplied("hosts"));
//!
//! let config = IntegrationConfig::parse("[elastic_integration]\ncloud_id = \"abc\"")?;
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::{ConfigError, IntegrationError};
use crate::secret::Password;

/// 필터 설정 파일 전체
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntegrationConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 연결 옵션 (검증 전)
    #[serde(default)]
    pub elastic_integration: RawConfig,
}

impl IntegrationConfig {
    /// 설정 파일을 로드하고 환경변수 오버라이드를 적용한 뒤 `[general]`을 검증합니다.
    ///
    /// 연결 옵션의 검증은 연결 검증 엔진의 몫입니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, IntegrationError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일을 파싱합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, IntegrationError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IntegrationError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                IntegrationError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        debug!(
            path = %path.display(),
            supplied = config.elastic_integration.supplied().len(),
            "config file parsed"
        );
        Ok(config)
    }

    /// TOML 문자열을 파싱합니다.
    ///
    /// `[elastic_integration]`의 알 수 없는 키와 타입 불일치는 `ParseFailed`입니다.
    pub fn parse(toml_str: &str) -> Result<Self, IntegrationError> {
        toml::from_str(toml_str).map_err(|e| {
            IntegrationError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 `[general]` 값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `ELASTIC_INTEGRATION_{SECTION}_{FIELD}`.
    /// 연결 옵션은 환경변수에서 읽지 않습니다.
    pub fn apply_env_overrides(&mut self) {
        override_string(
            &mut self.general.log_level,
            "ELASTIC_INTEGRATION_GENERAL_LOG_LEVEL",
        );
        override_string(
            &mut self.general.log_format,
            "ELASTIC_INTEGRATION_GENERAL_LOG_FORMAT",
        );
    }

    /// `[general]` 값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), IntegrationError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "json".to_owned(),
        }
    }
}

/// `[elastic_integration]` 섹션의 값
///
/// 모든 필드는 `Option`이며, `None`은 "지정되지 않음"을 뜻합니다.
/// 기본값은 여기에 채워 넣지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterOptions {
    pub id: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub hosts: Option<Vec<String>>,
    pub cloud_id: Option<String>,
    pub ssl_enabled: Option<bool>,
    pub ssl_verification_mode: Option<String>,
    pub ssl_certificate: Option<PathBuf>,
    pub ssl_key: Option<PathBuf>,
    pub ssl_key_passphrase: Option<Password>,
    pub ssl_keystore_path: Option<PathBuf>,
    pub ssl_keystore_password: Option<Password>,
    pub ssl_truststore_path: Option<PathBuf>,
    pub ssl_truststore_password: Option<Password>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub ssl_certificate_authorities: Option<Vec<PathBuf>>,
    pub username: Option<String>,
    pub password: Option<Password>,
    pub cloud_auth: Option<Password>,
    pub api_key: Option<Password>,
    pub geoip_database_directory: Option<PathBuf>,
    pub pipeline_name: Option<String>,
}

impl FilterOptions {
    /// 값이 들어 있는 옵션 키 목록
    fn present_keys(&self) -> BTreeSet<&'static str> {
        let present = [
            ("id", self.id.is_some()),
            ("hosts", self.hosts.is_some()),
            ("cloud_id", self.cloud_id.is_some()),
            ("ssl_enabled", self.ssl_enabled.is_some()),
            (
                "ssl_verification_mode",
                self.ssl_verification_mode.is_some(),
            ),
            ("ssl_certificate", self.ssl_certificate.is_some()),
            ("ssl_key", self.ssl_key.is_some()),
            ("ssl_key_passphrase", self.ssl_key_passphrase.is_some()),
            ("ssl_keystore_path", self.ssl_keystore_path.is_some()),
            (
                "ssl_keystore_password",
                self.ssl_keystore_password.is_some(),
            ),
            ("ssl_truststore_path", self.ssl_truststore_path.is_some()),
            (
                "ssl_truststore_password",
                self.ssl_truststore_password.is_some(),
            ),
            (
                "ssl_certificate_authorities",
                self.ssl_certificate_authorities.is_some(),
            ),
            ("username", self.username.is_some()),
            ("password", self.password.is_some()),
            ("cloud_auth", self.cloud_auth.is_some()),
            ("api_key", self.api_key.is_some()),
            (
                "geoip_database_directory",
                self.geoip_database_directory.is_some(),
            ),
            ("pipeline_name", self.pipeline_name.is_some()),
        ];
        present
            .into_iter()
            .filter_map(|(key, is_present)| is_present.then_some(key))
            .collect()
    }
}

/// 검증 전 연결 설정
///
/// 옵션 값과 호출자가 지정한 키 집합을 함께 보관합니다.
/// 생성 후에는 변경할 수 없습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FilterOptions", into = "FilterOptions")]
pub struct RawConfig {
    options: FilterOptions,
    supplied: BTreeSet<&'static str>,
}

impl RawConfig {
    /// 옵션 값
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// 호출자가 지정한 키 집합 (기본값은 포함되지 않음)
    pub fn supplied(&self) -> &BTreeSet<&'static str> {
        &self.supplied
    }

    /// 해당 키가 명시적으로 지정되었는지 확인합니다.
    pub fn is_supplied(&self, key: &str) -> bool {
        self.supplied.contains(key)
    }
}

impl From<FilterOptions> for RawConfig {
    fn from(options: FilterOptions) -> Self {
        let supplied = options.present_keys();
        Self { options, supplied }
    }
}

impl From<RawConfig> for FilterOptions {
    fn from(raw: RawConfig) -> Self {
        raw.options
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

/// 단일 값 또는 목록을 목록으로 읽습니다.
fn one_or_many<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(
        Option::<OneOrMany<T>>::deserialize(deserializer)?.map(|value| match value {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }),
    )
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

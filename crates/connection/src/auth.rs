//! 인증 설정 검증
//!
//! `username`/`password`, `api_key`, `cloud_auth` 중 최대 하나만 허용하며,
//! 선택된 방식은 빠짐없이 채워져 있어야 합니다.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use elastic_integration_core::config::RawConfig;
use elastic_integration_core::secret::Password;
use serde::Serialize;

use crate::error::ValidationError;
use crate::warning::ValidationWarning;

/// API 키
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiKey {
    value: Password,
}

impl ApiKey {
    pub fn new(value: Password) -> Self {
        Self { value }
    }

    /// `Authorization` 헤더 값
    ///
    /// `id:key` 형식이면 base64로 인코딩하고, 그 밖의 값은 이미 인코딩된
    /// 것으로 보고 그대로 씁니다.
    pub fn authorization_value(&self) -> Password {
        let raw = self.value.expose();
        let encoded = if is_id_and_key(raw) {
            STANDARD.encode(raw)
        } else {
            raw.to_owned()
        };
        Password::new(format!("ApiKey {encoded}"))
    }
}

fn is_id_and_key(value: &str) -> bool {
    matches!(value.split_once(':'), Some((id, key)) if !id.is_empty() && !key.is_empty() && !key.contains(':'))
}

/// 관리형 클러스터용 `<username>:<password>` 자격 증명
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CloudAuth {
    username: String,
    password: Password,
}

impl CloudAuth {
    /// `<username>:<password>` 형식을 파싱합니다. 두 부분 모두 비어 있으면 안 됩니다.
    pub fn parse(value: &Password) -> Result<Self, ValidationError> {
        match value.expose().split_once(':') {
            Some((username, password)) if !username.is_empty() && !password.is_empty() => {
                Ok(Self {
                    username: username.to_owned(),
                    password: Password::new(password),
                })
            }
            _ => Err(ValidationError::InvalidCloudAuth),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// 확정된 인증 설정
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthState {
    /// 인증 없음
    #[default]
    None,
    /// 기본 인증
    Basic { username: String, password: Password },
    /// API 키
    ApiKey(ApiKey),
    /// 관리형 클러스터 자격 증명
    CloudAuth(CloudAuth),
}

impl AuthState {
    pub fn is_configured(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// 에러 메시지에 쓰는 자격 증명 설명
    pub fn description(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Basic { .. } => Some("`username` and `password`"),
            Self::ApiKey(_) => Some("`api_key`"),
            Self::CloudAuth(_) => Some("`cloud_auth`"),
        }
    }
}

/// 인증 설정을 검증합니다.
///
/// `ssl_enabled`는 경고 판단에만 쓰입니다.
pub fn validate_auth(
    raw: &RawConfig,
    ssl_enabled: bool,
) -> Result<(AuthState, Vec<ValidationWarning>), ValidationError> {
    let opts = raw.options();

    let basic_key = if raw.is_supplied("username") {
        Some("username")
    } else if raw.is_supplied("password") {
        Some("password")
    } else {
        None
    };
    let mechanisms: Vec<&'static str> = [
        basic_key,
        raw.is_supplied("api_key").then_some("api_key"),
        raw.is_supplied("cloud_auth").then_some("cloud_auth"),
    ]
    .into_iter()
    .flatten()
    .collect();

    if mechanisms.len() > 1 {
        return Err(ValidationError::MultipleAuthMechanisms {
            options: mechanisms,
        });
    }

    let state = match (&opts.username, &opts.password, &opts.api_key, &opts.cloud_auth) {
        (Some(_), None, _, _) => {
            return Err(ValidationError::MissingCompanion {
                option: "username",
                requires: "password",
            });
        }
        (None, Some(_), _, _) => {
            return Err(ValidationError::OrphanOption {
                option: "password",
                requires: "username",
            });
        }
        (Some(username), Some(password), _, _) => {
            if username.is_empty() || password.is_empty() {
                return Err(ValidationError::EmptyBasicCredential);
            }
            AuthState::Basic {
                username: username.clone(),
                password: password.clone(),
            }
        }
        (None, None, Some(api_key), _) => {
            if api_key.is_empty() {
                return Err(ValidationError::EmptyCredential { option: "api_key" });
            }
            AuthState::ApiKey(ApiKey::new(api_key.clone()))
        }
        (None, None, None, Some(cloud_auth)) => {
            if cloud_auth.is_empty() {
                return Err(ValidationError::EmptyCredential {
                    option: "cloud_auth",
                });
            }
            AuthState::CloudAuth(CloudAuth::parse(cloud_auth)?)
        }
        (None, None, None, None) => AuthState::None,
    };

    let mut warnings = Vec::new();
    if state.is_configured() && !ssl_enabled {
        warnings.push(ValidationWarning::CredentialsOverHttp);
    }
    if !state.is_configured() && ssl_enabled {
        warnings.push(ValidationWarning::NoCredentials);
    }

    Ok((state, warnings))
}

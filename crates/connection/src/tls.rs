//! TLS 설정 검증
//!
//! TLS 활성화 여부가 확정된 뒤 실행되며, 신원 자료(인증서+키 또는 키스토어)와
//! 신뢰 자료(트러스트스토어 또는 CA 목록)의 짝과 배타 관계를 검사해
//! [`TlsState`]를 만듭니다.
//!
//! 검증 모드가 `none`이 아니고 신뢰 자료가 지정되지 않으면 시스템 신뢰 저장소
//! ([`SystemTrust`])를 사용합니다. 시스템 신뢰 저장소도 없으면 실패합니다.
//! 키스토어를 신뢰 자료로 대신 쓰지 않습니다.

use std::fmt;
use std::path::{Path, PathBuf};

use elastic_integration_core::config::RawConfig;
use elastic_integration_core::options;
use elastic_integration_core::secret::Password;
use serde::Serialize;
use tracing::debug;

use crate::access::{PathProbe, ensure_readable_and_non_writable};
use crate::error::ValidationError;

/// 서버 인증서 검증 수준
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationMode {
    /// 인증서 체인과 호스트 이름 모두 검증
    #[default]
    Full,
    /// 인증서 체인만 검증
    Certificate,
    /// 검증하지 않음
    None,
}

impl VerificationMode {
    /// 대소문자를 구분하지 않고 파싱합니다.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "certificate" => Ok(Self::Certificate),
            "none" => Ok(Self::None),
            _ => Err(ValidationError::InvalidVerificationMode {
                value: value.to_owned(),
            }),
        }
    }

    /// 설정 값 표기
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Certificate => "certificate",
            Self::None => "none",
        }
    }

    /// 신뢰 자료가 필요한 모드인지
    pub fn requires_trust(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for VerificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 이 컴포넌트가 제시하는 신원 자료
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IdentityMaterial {
    /// PEM 인증서와 암호화된 키
    CertificateKey {
        certificate: PathBuf,
        key: PathBuf,
        passphrase: Password,
    },
    /// 키스토어
    Keystore { path: PathBuf, password: Password },
}

/// 서버 인증서를 신뢰할 근거
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrustMaterial {
    /// 시스템 신뢰 저장소
    System,
    /// 트러스트스토어
    Truststore { path: PathBuf, password: Password },
    /// CA 인증서 목록
    CertificateAuthorities { paths: Vec<PathBuf> },
    /// 검증 모드 `none`에서는 신뢰를 확립하지 않음
    Unverified,
}

impl TrustMaterial {
    /// 로그용 이름
    pub fn name(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Truststore { .. } => "truststore",
            Self::CertificateAuthorities { .. } => "certificate_authorities",
            Self::Unverified => "unverified",
        }
    }
}

/// 확정된 TLS 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TlsState {
    Disabled,
    Enabled {
        verification_mode: VerificationMode,
        #[serde(skip_serializing_if = "Option::is_none")]
        identity: Option<IdentityMaterial>,
        trust: TrustMaterial,
    },
}

impl TlsState {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled { .. })
    }

    /// TLS가 켜져 있으면 검증 모드
    pub fn verification_mode(&self) -> Option<VerificationMode> {
        match self {
            Self::Enabled {
                verification_mode, ..
            } => Some(*verification_mode),
            Self::Disabled => None,
        }
    }
}

/// 잘 알려진 CA 번들 위치
const WELL_KNOWN_BUNDLES: &[&str] = &[
    "/etc/ssl/certs/ca-certificates.crt",
    "/etc/pki/tls/certs/ca-bundle.crt",
    "/etc/ssl/ca-bundle.pem",
    "/etc/pki/tls/cacert.pem",
    "/etc/pki/ca-trust/extracted/pem/tls-ca-bundle.pem",
    "/etc/ssl/cert.pem",
    "/usr/local/etc/openssl/cert.pem",
];

/// 시스템 신뢰 저장소 가용성
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemTrust {
    /// 사용 가능 (발견한 위치)
    Available(PathBuf),
    /// 사용 불가
    Unavailable,
}

impl SystemTrust {
    /// `SSL_CERT_FILE`, `SSL_CERT_DIR`, 잘 알려진 번들 위치 순으로 찾습니다.
    pub fn detect() -> Self {
        if let Some(file) = std::env::var_os("SSL_CERT_FILE").map(PathBuf::from) {
            if file.is_file() {
                return Self::Available(file);
            }
        }
        if let Some(dir) = std::env::var_os("SSL_CERT_DIR").map(PathBuf::from) {
            if dir.is_dir() {
                return Self::Available(dir);
            }
        }
        WELL_KNOWN_BUNDLES
            .iter()
            .map(Path::new)
            .find(|bundle| bundle.is_file())
            .map_or(Self::Unavailable, |bundle| {
                Self::Available(bundle.to_path_buf())
            })
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

/// TLS 설정을 검증하고 확정합니다.
///
/// `ssl_enabled`는 이미 확정된 값이어야 합니다.
pub fn validate_ssl(
    raw: &RawConfig,
    ssl_enabled: bool,
    probe: &dyn PathProbe,
    system_trust: &SystemTrust,
) -> Result<TlsState, ValidationError> {
    if !ssl_enabled {
        let provided: Vec<&'static str> = raw
            .supplied()
            .iter()
            .copied()
            .filter(|key| options::is_tls_only(key))
            .collect();
        if !provided.is_empty() {
            return Err(ValidationError::DisallowedOptions { options: provided });
        }
        return Ok(TlsState::Disabled);
    }

    let opts = raw.options();
    let verification_mode = opts
        .ssl_verification_mode
        .as_deref()
        .map(VerificationMode::parse)
        .transpose()?
        .unwrap_or_default();

    let identity = validate_identity(raw, probe)?;
    let trust = validate_trust(raw, verification_mode, probe, system_trust)?;

    debug!(
        %verification_mode,
        identity = identity.is_some(),
        trust = trust.name(),
        "TLS settings resolved"
    );

    Ok(TlsState::Enabled {
        verification_mode,
        identity,
        trust,
    })
}

fn validate_identity(
    raw: &RawConfig,
    probe: &dyn PathProbe,
) -> Result<Option<IdentityMaterial>, ValidationError> {
    let opts = raw.options();
    let certificate = opts.ssl_certificate.as_deref();
    let key = opts.ssl_key.as_deref();
    let passphrase = opts.ssl_key_passphrase.as_ref();
    let keystore = opts.ssl_keystore_path.as_deref();
    let keystore_password = opts.ssl_keystore_password.as_ref();

    if certificate.is_some() && keystore.is_some() {
        return Err(ValidationError::ConflictingOptions {
            first: "ssl_certificate",
            second: "ssl_keystore_path",
        });
    }

    if let Some(certificate) = certificate {
        if key.is_none() {
            return Err(ValidationError::MissingCompanion {
                option: "ssl_certificate",
                requires: "ssl_key",
            });
        }
        ensure_readable_and_non_writable(probe, "ssl_certificate", certificate)?;
    }

    if let Some(key) = key {
        if certificate.is_none() {
            return Err(ValidationError::OrphanOption {
                option: "ssl_key",
                requires: "ssl_certificate",
            });
        }
        if passphrase.is_none() {
            return Err(ValidationError::MissingCompanion {
                option: "ssl_key",
                requires: "ssl_key_passphrase",
            });
        }
        ensure_readable_and_non_writable(probe, "ssl_key", key)?;
    }

    if let Some(passphrase) = passphrase {
        if key.is_none() {
            return Err(ValidationError::OrphanOption {
                option: "ssl_key_passphrase",
                requires: "ssl_key",
            });
        }
        if passphrase.is_empty() {
            return Err(ValidationError::EmptyPassphrase {
                option: "ssl_key_passphrase",
            });
        }
    }

    if keystore.is_some() && keystore_password.is_none() {
        return Err(ValidationError::MissingCompanion {
            option: "ssl_keystore_path",
            requires: "ssl_keystore_password",
        });
    }
    if let Some(password) = keystore_password {
        if keystore.is_none() {
            return Err(ValidationError::OrphanOption {
                option: "ssl_keystore_password",
                requires: "ssl_keystore_path",
            });
        }
        if password.is_empty() {
            return Err(ValidationError::EmptyPassphrase {
                option: "ssl_keystore_password",
            });
        }
    }
    if let Some(keystore) = keystore {
        ensure_readable_and_non_writable(probe, "ssl_keystore_path", keystore)?;
    }

    let identity = match (certificate, key, passphrase, keystore, keystore_password) {
        (Some(certificate), Some(key), Some(passphrase), _, _) => {
            Some(IdentityMaterial::CertificateKey {
                certificate: certificate.to_path_buf(),
                key: key.to_path_buf(),
                passphrase: passphrase.clone(),
            })
        }
        (_, _, _, Some(path), Some(password)) => Some(IdentityMaterial::Keystore {
            path: path.to_path_buf(),
            password: password.clone(),
        }),
        _ => None,
    };
    Ok(identity)
}

fn validate_trust(
    raw: &RawConfig,
    verification_mode: VerificationMode,
    probe: &dyn PathProbe,
    system_trust: &SystemTrust,
) -> Result<TrustMaterial, ValidationError> {
    let opts = raw.options();
    let truststore = opts.ssl_truststore_path.as_deref();
    let truststore_password = opts.ssl_truststore_password.as_ref();
    let authorities = opts.ssl_certificate_authorities.as_deref();

    if !verification_mode.requires_trust() {
        if truststore.is_some() {
            return Err(ValidationError::VerificationModeForbids {
                option: "ssl_truststore_path",
            });
        }
        if truststore_password.is_some() {
            return Err(ValidationError::TruststorePasswordWithoutVerification);
        }
        if authorities.is_some() {
            return Err(ValidationError::VerificationModeForbids {
                option: "ssl_certificate_authorities",
            });
        }
        return Ok(TrustMaterial::Unverified);
    }

    if truststore.is_some() && authorities.is_some() {
        return Err(ValidationError::ConflictingOptions {
            first: "ssl_truststore_path",
            second: "ssl_certificate_authorities",
        });
    }

    if let Some(truststore) = truststore {
        if truststore_password.is_none() {
            return Err(ValidationError::MissingCompanion {
                option: "ssl_truststore_path",
                requires: "ssl_truststore_password",
            });
        }
        ensure_readable_and_non_writable(probe, "ssl_truststore_path", truststore)?;
    }

    if let Some(password) = truststore_password {
        if truststore.is_none() {
            return Err(ValidationError::OrphanOption {
                option: "ssl_truststore_password",
                requires: "ssl_truststore_path",
            });
        }
        if password.is_empty() {
            return Err(ValidationError::EmptyPassphrase {
                option: "ssl_truststore_password",
            });
        }
    }

    if let Some(authorities) = authorities {
        if authorities.is_empty() {
            return Err(ValidationError::EmptyCertificateAuthorities);
        }
        for authority in authorities {
            ensure_readable_and_non_writable(probe, "ssl_certificate_authorities", authority)?;
        }
    }

    match (truststore, truststore_password, authorities) {
        (Some(path), Some(password), _) => Ok(TrustMaterial::Truststore {
            path: path.to_path_buf(),
            password: password.clone(),
        }),
        (_, _, Some(paths)) => Ok(TrustMaterial::CertificateAuthorities {
            paths: paths.to_vec(),
        }),
        _ if system_trust.is_available() => Ok(TrustMaterial::System),
        _ => Err(ValidationError::MissingTrustMaterial {
            mode: verification_mode.as_str(),
        }),
    }
}

//! 옵션 테이블: `[elastic_integration]` 섹션이 인식하는 모든 키
//!
//! 각 항목은 이름, 값 종류, 기본값, TLS 전용 여부, 비밀 여부를 가집니다.
//! 기본값은 "명시적으로 지정되었는가?" 판단에 절대 포함되지 않습니다.

use std::fmt;

use serde::Serialize;

/// 옵션 값 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    /// 문자열
    String,
    /// 불리언
    Boolean,
    /// 파일시스템 경로
    Path,
    /// 비밀 값
    Password,
    /// 엔드포인트 URI 목록
    UriList,
    /// 경로 목록
    PathList,
    /// 열거형 문자열
    Enum(&'static [&'static str]),
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Boolean => write!(f, "boolean"),
            Self::Path => write!(f, "path"),
            Self::Password => write!(f, "password"),
            Self::UriList => write!(f, "uri list"),
            Self::PathList => write!(f, "path list"),
            Self::Enum(values) => write!(f, "one of {}", values.join("|")),
        }
    }
}

/// 옵션 정의
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OptionSpec {
    /// 옵션 키
    pub name: &'static str,
    /// 값 종류
    pub kind: OptionKind,
    /// 기본값 (적용 조건은 `description` 참고)
    pub default: Option<&'static str>,
    /// TLS가 꺼져 있으면 지정할 수 없는 옵션
    pub tls_only: bool,
    /// 출력 시 마스킹 대상
    pub secret: bool,
    /// 한 줄 설명
    pub description: &'static str,
}

/// 검증 모드 허용 값
pub const VERIFICATION_MODES: &[&str] = &["full", "certificate", "none"];

const fn opt(name: &'static str, kind: OptionKind, description: &'static str) -> OptionSpec {
    OptionSpec {
        name,
        kind,
        default: None,
        tls_only: false,
        secret: matches!(kind, OptionKind::Password),
        description,
    }
}

const fn tls(name: &'static str, kind: OptionKind, description: &'static str) -> OptionSpec {
    OptionSpec {
        tls_only: true,
        ..opt(name, kind, description)
    }
}

/// 인식하는 전체 옵션 (선언 순서 = 출력 순서)
pub const OPTIONS: &[OptionSpec] = &[
    opt("id", OptionKind::String, "component identity; generated when omitted"),
    opt("hosts", OptionKind::UriList, "cluster endpoints; exclusive with `cloud_id`"),
    tls("cloud_id", OptionKind::String, "managed cluster identifier; exclusive with `hosts`"),
    opt("ssl_enabled", OptionKind::Boolean, "inferred from `hosts`/`cloud_id` when omitted"),
    OptionSpec {
        default: Some("full"),
        ..tls(
            "ssl_verification_mode",
            OptionKind::Enum(VERIFICATION_MODES),
            "how strictly the server certificate is verified (default applies only with TLS)",
        )
    },
    tls("ssl_certificate", OptionKind::Path, "client certificate; requires `ssl_key`"),
    tls("ssl_key", OptionKind::Path, "client key; requires `ssl_key_passphrase`"),
    tls("ssl_key_passphrase", OptionKind::Password, "passphrase for `ssl_key`"),
    tls("ssl_keystore_path", OptionKind::Path, "client keystore; exclusive with `ssl_certificate`"),
    tls("ssl_keystore_password", OptionKind::Password, "password for `ssl_keystore_path`"),
    tls("ssl_truststore_path", OptionKind::Path, "truststore overriding the system trust"),
    tls("ssl_truststore_password", OptionKind::Password, "password for `ssl_truststore_path`"),
    tls(
        "ssl_certificate_authorities",
        OptionKind::PathList,
        "CA certificates overriding the system trust; exclusive with `ssl_truststore_path`",
    ),
    opt("username", OptionKind::String, "basic auth username; requires `password`"),
    opt("password", OptionKind::Password, "basic auth password"),
    opt("cloud_auth", OptionKind::Password, "`<username>:<password>` for managed clusters"),
    opt("api_key", OptionKind::Password, "API key, encoded or `id:key`"),
    opt(
        "geoip_database_directory",
        OptionKind::Path,
        "directory of *.mmdb files handed to the GeoIP provider",
    ),
    opt("pipeline_name", OptionKind::String, "template resolving the ingest pipeline name"),
];

/// 이름으로 옵션 정의를 조회합니다.
pub fn lookup(name: &str) -> Option<&'static OptionSpec> {
    OPTIONS.iter().find(|spec| spec.name == name)
}

/// TLS가 꺼져 있을 때 허용되지 않는 옵션인지 판단합니다.
///
/// `ssl_` 접두어(단 `ssl_enabled` 제외)와 `cloud_id`가 해당됩니다.
pub fn is_tls_only(name: &str) -> bool {
    name != "ssl_enabled" && (name.starts_with("ssl_") || name.starts_with("cloud_id"))
}

//! 엔드포인트 URI
//!
//! [`EndpointUri`]는 클러스터 주소 하나를 나타냅니다.
//! 정규화 전에는 스킴, 포트, 경로가 비어 있을 수 있습니다.
//!
//! 허용하는 입력 형식:
//!
//! - `host`, `host:port`
//! - `scheme://host[:port][/path]`
//! - `//host[:port][/path]`
//! - IPv6 리터럴은 `[::1]`처럼 대괄호로 감쌉니다.
//!
//! 사용자 정보(`user@`), 쿼리, 프래그먼트는 허용하지 않습니다.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use url::Url;

use crate::error::ValidationError;

/// TLS를 쓰는 스킴
pub const HTTPS_SCHEME: &str = "https";

/// TLS를 쓰지 않는 스킴
pub const HTTP_SCHEME: &str = "http";

/// 포트 기본값
pub const DEFAULT_PORT: u16 = 9200;

/// 경로 기본값
pub const DEFAULT_PATH: &str = "/";

// url 크레이트가 기본 포트를 지우지 않도록 특수하지 않은 스킴으로 파싱합니다.
const PARSE_SCHEME: &str = "endpoint";

/// 클러스터 엔드포인트
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EndpointUri {
    scheme: Option<String>,
    host: String,
    port: Option<u16>,
    path: Option<String>,
}

impl EndpointUri {
    /// 호스트 문자열을 파싱합니다.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidHost {
            host: input.to_owned(),
            reason: reason.to_owned(),
        };

        if input.trim().is_empty() {
            return Err(invalid("host must not be empty"));
        }

        let (scheme, rest) = match input.split_once("://") {
            Some((scheme, rest)) => {
                if !is_valid_scheme(scheme) {
                    return Err(invalid("scheme is malformed"));
                }
                (Some(scheme.to_ascii_lowercase()), rest)
            }
            None => (None, input.strip_prefix("//").unwrap_or(input)),
        };

        let url = Url::parse(&format!("{PARSE_SCHEME}://{rest}"))
            .map_err(|e| invalid(&e.to_string()))?;

        if !url.username().is_empty() || url.password().is_some() {
            return Err(invalid("user info is not allowed; use `username`/`password`"));
        }
        if url.query().is_some() {
            return Err(invalid("query is not allowed"));
        }
        if url.fragment().is_some() {
            return Err(invalid("fragment is not allowed"));
        }

        let host = match url.host_str() {
            Some(host) if !host.is_empty() => host.to_owned(),
            _ => return Err(invalid("host is missing")),
        };

        let path = match url.path() {
            "" => None,
            path => Some(path.to_owned()),
        };

        Ok(Self {
            scheme,
            host,
            port: url.port(),
            path,
        })
    }

    /// 스킴 (소문자)
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// 호스트 (IPv6는 대괄호 포함)
    pub fn host(&self) -> &str {
        &self.host
    }

    /// 포트
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// 경로
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// 스킴, 포트, 경로가 모두 채워졌는지
    pub fn is_fully_specified(&self) -> bool {
        self.scheme.is_some() && self.port.is_some() && self.path.is_some()
    }

    /// 스킴을 바꾼 새 값을 돌려줍니다.
    pub fn with_scheme(self, scheme: &str) -> Self {
        Self {
            scheme: Some(scheme.to_ascii_lowercase()),
            ..self
        }
    }

    /// 포트를 바꾼 새 값을 돌려줍니다.
    pub fn with_port(self, port: u16) -> Self {
        Self {
            port: Some(port),
            ..self
        }
    }

    /// 경로를 바꾼 새 값을 돌려줍니다.
    pub fn with_path(self, path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..self
        }
    }
}

fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

impl FromStr for EndpointUri {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for EndpointUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{scheme}://")?;
        }
        f.write_str(&self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        if let Some(path) = &self.path {
            f.write_str(path)?;
        }
        Ok(())
    }
}

impl Serialize for EndpointUri {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

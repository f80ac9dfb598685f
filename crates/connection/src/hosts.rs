//! 호스트 정규화
//!
//! 스킴, 포트, 경로가 제각각인 호스트 목록을 모두 채워진, 서로 일관된
//! 목록으로 바꿉니다. 입력 순서는 그대로 유지됩니다.

use tracing::debug;

use crate::connection::ConnectionTarget;
use crate::endpoint::{DEFAULT_PATH, DEFAULT_PORT, EndpointUri, HTTP_SCHEME, HTTPS_SCHEME};
use crate::error::ValidationError;

/// `ssl_enabled`가 지정되지 않았을 때 연결 대상으로부터 TLS 사용 여부를 추론합니다.
///
/// - `cloud_id` 사용 시 `true`
/// - 모든 호스트에 스킴이 없거나 모두 `https`이면 `true`
/// - 모두 `http`이면 `false`
/// - 그 밖의 조합은 [`ValidationError::MixedProtocols`]
pub fn infer_ssl_enabled(target: &ConnectionTarget) -> Result<bool, ValidationError> {
    let hosts = match target {
        ConnectionTarget::CloudId(_) => return Ok(true),
        ConnectionTarget::Hosts(hosts) => hosts,
    };

    if hosts.iter().all(|host| host.scheme().is_none()) {
        return Ok(true);
    }
    if hosts.iter().all(|host| host.scheme() == Some(HTTPS_SCHEME)) {
        return Ok(true);
    }
    if hosts.iter().all(|host| host.scheme() == Some(HTTP_SCHEME)) {
        return Ok(false);
    }
    Err(ValidationError::MixedProtocols)
}

/// 호스트 목록을 정규화한 새 목록을 돌려줍니다.
///
/// `ssl_enabled`가 아직 확정되지 않았으면(`None`) 실패합니다.
/// 첫 호스트의 경로(없으면 `/`)가 기준 경로가 되며, 모든 호스트가 같아야 합니다.
pub fn normalize_hosts(
    hosts: &[EndpointUri],
    ssl_enabled: Option<bool>,
) -> Result<Vec<EndpointUri>, ValidationError> {
    if hosts.is_empty() {
        return Ok(Vec::new());
    }
    let Some(ssl_enabled) = ssl_enabled else {
        return Err(ValidationError::PrematureNormalization);
    };

    let root_path = hosts[0]
        .path()
        .filter(|path| !path.is_empty())
        .unwrap_or(DEFAULT_PATH)
        .to_owned();
    let scheme = if ssl_enabled { HTTPS_SCHEME } else { HTTP_SCHEME };

    let normalized = hosts
        .iter()
        .cloned()
        .map(|host| {
            let host = match host.port() {
                Some(_) => host,
                None => host.with_port(DEFAULT_PORT),
            };
            let host = match host.path() {
                Some(path) if !path.is_empty() => host,
                _ => host.with_path(DEFAULT_PATH),
            };
            if host.path() != Some(root_path.as_str()) {
                return Err(ValidationError::PathMismatch);
            }

            match host.scheme() {
                None => Ok(host.with_scheme(scheme)),
                Some(existing) if existing == scheme => Ok(host),
                Some(_) => Err(ValidationError::SchemeMismatch {
                    scheme: scheme.to_owned(),
                    ssl_enabled,
                }),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        count = normalized.len(),
        scheme,
        path = root_path.as_str(),
        "hosts normalized"
    );
    Ok(normalized)
}

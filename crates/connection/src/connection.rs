//! 연결 대상 선결 조건 검증
//!
//! `hosts`와 `cloud_id` 중 정확히 하나만 비어 있지 않은 값으로 지정되어야 합니다.

use elastic_integration_core::config::RawConfig;
use serde::Serialize;

use crate::endpoint::EndpointUri;
use crate::error::ValidationError;

/// 연결 대상
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionTarget {
    /// 명시적 호스트 목록 (비어 있지 않음)
    Hosts(Vec<EndpointUri>),
    /// 관리형 클러스터 식별자 (비어 있지 않음)
    CloudId(String),
}

impl ConnectionTarget {
    /// 호스트 목록 (cloud_id 사용 시 `None`)
    pub fn hosts(&self) -> Option<&[EndpointUri]> {
        match self {
            Self::Hosts(hosts) => Some(hosts),
            Self::CloudId(_) => None,
        }
    }

    pub fn cloud_id(&self) -> Option<&str> {
        match self {
            Self::CloudId(id) => Some(id),
            Self::Hosts(_) => None,
        }
    }
}

/// `hosts`와 `cloud_id`의 선결 조건을 검사하고 연결 대상을 돌려줍니다.
///
/// 검사 순서:
/// 1. 둘 다 비어 있지 않으면 [`ValidationError::BothConnectionModes`]
/// 2. 둘 다 지정되지 않았으면 [`ValidationError::NoConnectionMode`]
/// 3. 빈 `cloud_id`는 [`ValidationError::EmptyCloudIdentifier`]
/// 4. 빈 `hosts`는 [`ValidationError::EmptyHostList`]
///
/// 호스트 문자열은 이 단계에서 [`EndpointUri`]로 파싱되며, 정규화는 하지 않습니다.
pub fn validate_connection_settings(raw: &RawConfig) -> Result<ConnectionTarget, ValidationError> {
    let opts = raw.options();
    let hosts = opts.hosts.as_deref();
    let cloud_id = opts.cloud_id.as_deref();

    let has_hosts = hosts.is_some_and(|hosts| !hosts.is_empty());
    let has_cloud_id = cloud_id.is_some_and(|id| !id.is_empty());

    if has_hosts && has_cloud_id {
        return Err(ValidationError::BothConnectionModes);
    }
    if hosts.is_none() && cloud_id.is_none() {
        return Err(ValidationError::NoConnectionMode);
    }
    if cloud_id.is_some() && !has_cloud_id {
        return Err(ValidationError::EmptyCloudIdentifier);
    }
    if hosts.is_some() && !has_hosts {
        return Err(ValidationError::EmptyHostList);
    }

    match (hosts, cloud_id) {
        (Some(hosts), _) => {
            let parsed = hosts
                .iter()
                .map(|host| EndpointUri::parse(host))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ConnectionTarget::Hosts(parsed))
        }
        (None, Some(cloud_id)) => Ok(ConnectionTarget::CloudId(cloud_id.to_owned())),
        (None, None) => Err(ValidationError::NoConnectionMode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elastic_integration_core::config::FilterOptions;

    fn check(hosts: Option<Vec<&str>>, cloud_id: Option<&str>) -> Result<ConnectionTarget, ValidationError> {
        let raw = RawConfig::from(FilterOptions {
            hosts: hosts.map(|hosts| hosts.into_iter().map(str::to_owned).collect()),
            cloud_id: cloud_id.map(str::to_owned),
            ..FilterOptions::default()
        });
        validate_connection_settings(&raw)
    }

    #[test]
    fn both_modes_fail() {
        assert_eq!(
            check(Some(vec!["a"]), Some("x")),
            Err(ValidationError::BothConnectionModes)
        );
    }

    #[test]
    fn neither_mode_fails() {
        assert_eq!(check(None, None), Err(ValidationError::NoConnectionMode));
    }

    #[test]
    fn empty_cloud_id_fails() {
        assert_eq!(check(None, Some("")), Err(ValidationError::EmptyCloudIdentifier));
        assert_eq!(
            check(Some(vec!["a"]), Some("")),
            Err(ValidationError::EmptyCloudIdentifier)
        );
    }

    #[test]
    fn empty_host_list_fails() {
        assert_eq!(check(Some(vec![]), None), Err(ValidationError::EmptyHostList));
        assert_eq!(
            check(Some(vec![]), Some("x")),
            Err(ValidationError::EmptyHostList)
        );
    }

    #[test]
    fn both_empty_reports_cloud_id_first() {
        assert_eq!(
            check(Some(vec![]), Some("")),
            Err(ValidationError::EmptyCloudIdentifier)
        );
    }

    #[test]
    fn hosts_are_parsed_not_normalized() {
        let target = check(Some(vec!["a", "http://b:1"]), None).unwrap();
        let hosts = target.hosts().unwrap();
        assert_eq!(hosts.len(), 2);
        assert_eq!(hosts[0].scheme(), None);
        assert_eq!(hosts[1].port(), Some(1));
        assert!(target.cloud_id().is_none());
    }

    #[test]
    fn malformed_host_fails() {
        assert!(matches!(
            check(Some(vec!["http://"]), None),
            Err(ValidationError::InvalidHost { .. })
        ));
    }

    #[test]
    fn cloud_id_is_kept_verbatim() {
        let target = check(None, Some("deployment:abc")).unwrap();
        assert_eq!(target.cloud_id(), Some("deployment:abc"));
    }
}

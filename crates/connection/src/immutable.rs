//! 불변 연결 설정
//!
//! [`ImmutableConnectionConfig`]는 검증과 정규화를 모두 마친 최종 결과물입니다.
//! 생성 후에는 변경할 수 없으며, 클라이언트 빌더와 보강 엔진 빌더에
//! 전달되는 유일한 값입니다.
//!
//! 빌더는 이미 검증된 값을 조립하기만 하므로 실패하지 않습니다.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::auth::AuthState;
use crate::connection::ConnectionTarget;
use crate::endpoint::EndpointUri;
use crate::tls::TlsState;

/// 검증이 끝난 연결 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImmutableConnectionConfig {
    id: String,
    target: ConnectionTarget,
    tls: TlsState,
    auth: AuthState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pipeline_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    geoip_database_directory: Option<PathBuf>,
}

impl ImmutableConnectionConfig {
    /// 빌더를 생성합니다. 식별자와 연결 대상은 필수입니다.
    pub fn builder(id: impl Into<String>, target: ConnectionTarget) -> ImmutableConnectionConfigBuilder {
        ImmutableConnectionConfigBuilder {
            config: Self {
                id: id.into(),
                target,
                tls: TlsState::Disabled,
                auth: AuthState::None,
                pipeline_name: None,
                geoip_database_directory: None,
            },
        }
    }

    /// 컴포넌트 식별자
    pub fn id(&self) -> &str {
        &self.id
    }

    /// 연결 대상
    pub fn target(&self) -> &ConnectionTarget {
        &self.target
    }

    /// 정규화된 호스트 목록 (cloud_id 사용 시 `None`)
    pub fn hosts(&self) -> Option<&[EndpointUri]> {
        self.target.hosts()
    }

    pub fn cloud_id(&self) -> Option<&str> {
        self.target.cloud_id()
    }

    pub fn tls(&self) -> &TlsState {
        &self.tls
    }

    pub fn ssl_enabled(&self) -> bool {
        self.tls.is_enabled()
    }

    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    /// 수집 파이프라인 이름 템플릿 (보강 엔진에 그대로 전달)
    pub fn pipeline_name(&self) -> Option<&str> {
        self.pipeline_name.as_deref()
    }

    /// GeoIP 데이터베이스 디렉터리 (GeoIP 제공자에 그대로 전달)
    pub fn geoip_database_directory(&self) -> Option<&Path> {
        self.geoip_database_directory.as_deref()
    }
}

/// [`ImmutableConnectionConfig`] 빌더
#[derive(Debug)]
pub struct ImmutableConnectionConfigBuilder {
    config: ImmutableConnectionConfig,
}

impl ImmutableConnectionConfigBuilder {
    /// 확정된 TLS 설정을 지정합니다.
    pub fn tls(mut self, tls: TlsState) -> Self {
        self.config.tls = tls;
        self
    }

    /// 확정된 인증 설정을 지정합니다.
    pub fn auth(mut self, auth: AuthState) -> Self {
        self.config.auth = auth;
        self
    }

    pub fn pipeline_name(mut self, pipeline_name: Option<String>) -> Self {
        self.config.pipeline_name = pipeline_name;
        self
    }

    pub fn geoip_database_directory(mut self, directory: Option<PathBuf>) -> Self {
        self.config.geoip_database_directory = directory;
        self
    }

    /// 설정을 고정합니다.
    pub fn build(self) -> ImmutableConnectionConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tls::{TrustMaterial, VerificationMode};
    use elastic_integration_core::secret::Password;

    fn hosts() -> ConnectionTarget {
        ConnectionTarget::Hosts(vec![EndpointUri::parse("https://a:9200/").unwrap()])
    }

    #[test]
    fn builder_defaults_to_plaintext_without_auth() {
        let config = ImmutableConnectionConfig::builder("filter-1", hosts()).build();
        assert_eq!(config.id(), "filter-1");
        assert!(!config.ssl_enabled());
        assert_eq!(config.auth(), &AuthState::None);
        assert!(config.pipeline_name().is_none());
        assert_eq!(config.hosts().map(<[_]>::len), Some(1));
        assert!(config.cloud_id().is_none());
    }

    #[test]
    fn builder_keeps_forwarded_options() {
        let config = ImmutableConnectionConfig::builder("id", ConnectionTarget::CloudId("c".to_owned()))
            .pipeline_name(Some("logs-%{[data_stream][dataset]}".to_owned()))
            .geoip_database_directory(Some(PathBuf::from("/geoip")))
            .build();
        assert_eq!(config.cloud_id(), Some("c"));
        assert_eq!(config.pipeline_name(), Some("logs-%{[data_stream][dataset]}"));
        assert_eq!(config.geoip_database_directory(), Some(Path::new("/geoip")));
    }

    #[test]
    fn serialization_redacts_and_renders_hosts() {
        let config = ImmutableConnectionConfig::builder("id", hosts())
            .tls(TlsState::Enabled {
                verification_mode: VerificationMode::Full,
                identity: None,
                trust: TrustMaterial::System,
            })
            .auth(AuthState::Basic {
                username: "elastic".to_owned(),
                password: Password::new("changeme"),
            })
            .build();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["target"]["hosts"][0], "https://a:9200/");
        assert_eq!(json["tls"]["verification_mode"], "full");
        assert_eq!(json["auth"]["password"], "[REDACTED]");
        assert!(json.get("pipeline_name").is_none());
    }
}

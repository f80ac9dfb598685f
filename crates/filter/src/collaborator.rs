//! 외부 협력자 계약
//!
//! 필터는 네트워크 클라이언트, 보강 엔진, GeoIP 데이터베이스를 직접 구현하지 않습니다.
//! 이 모듈의 trait들은 임베딩 프로세스가 제공해야 하는 협력자의 모양을 정의합니다.
//!
//! ```text
//! ImmutableConnectionConfig ─▶ ClientFactory ─▶ Client (PreflightCheck)
//!                                                   │
//!            GeoIpSource + FilterMatchListener ─────┴─▶ EngineFactory ─▶ EnrichmentEngine
//! ```

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use elastic_integration_connection::ImmutableConnectionConfig;
use elastic_integration_core::error::{ClientError, EngineError, PreflightError};
use elastic_integration_core::event::Event;

/// 서버리스 클러스터에 고정하는 API 버전
pub const ELASTIC_API_VERSION: &str = "2023-10-31";

/// 클라이언트 요청에 붙는 `User-Agent` 값
pub fn user_agent() -> String {
    format!("elastic-integration/{}", env!("CARGO_PKG_VERSION"))
}

/// 클라이언트 생성 옵션
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub user_agent: String,
    /// 지정하면 모든 요청에 API 버전 헤더를 붙입니다.
    pub api_version: Option<String>,
}

impl ClientOptions {
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            user_agent: user_agent(),
            api_version: None,
        }
    }
}

/// 원격 클러스터 사전 점검
///
/// 클라이언트 타입이 직접 구현합니다.
pub trait PreflightCheck: Send + Sync {
    /// 필터에 필요한 클러스터 권한을 확인합니다.
    ///
    /// 보안 기능이 꺼진 클러스터는 [`PreflightError::SecurityDisabled`]를 돌려줘야 합니다.
    fn check_user_privileges(&self) -> impl Future<Output = Result<(), PreflightError>> + Send;

    /// 클러스터 라이선스를 확인합니다.
    fn check_license(&self) -> impl Future<Output = Result<(), PreflightError>> + Send;

    /// 서버리스 클러스터인지 확인합니다.
    fn is_serverless(&self) -> impl Future<Output = Result<bool, PreflightError>> + Send;

    /// 권한과 라이선스를 차례로 확인합니다.
    fn check(&self) -> impl Future<Output = Result<(), PreflightError>> + Send {
        async move {
            self.check_user_privileges().await?;
            self.check_license().await
        }
    }
}

/// 검증된 설정으로 클라이언트를 만드는 협력자
pub trait ClientFactory: Send + Sync {
    type Client: PreflightCheck;

    fn build(
        &self,
        config: &ImmutableConnectionConfig,
        options: &ClientOptions,
    ) -> impl Future<Output = Result<Self::Client, ClientError>> + Send;
}

/// 이벤트 배치를 보강하는 엔진
pub trait EnrichmentEngine: Send + Sync {
    /// 배치를 처리해 결과 이벤트를 돌려줍니다. 입력과 개수가 다를 수 있습니다.
    fn process(
        &self,
        events: Vec<Event>,
    ) -> impl Future<Output = Result<Vec<Event>, EngineError>> + Send;

    /// 엔진 자원을 해제합니다.
    fn close(&self) -> impl Future<Output = ()> + Send;
}

/// 클라이언트와 설정으로 보강 엔진을 만드는 협력자
pub trait EngineFactory<C>: Send + Sync {
    type Engine: EnrichmentEngine;

    fn build(
        &self,
        client: &C,
        config: &ImmutableConnectionConfig,
        geoip: GeoIpSource,
        listener: FilterMatchListener,
    ) -> impl Future<Output = Result<Self::Engine, EngineError>> + Send;
}

/// 외부에서 수명을 관리하는 GeoIP 데이터베이스
pub trait GeoIpProvider: Send + Sync {
    /// 제공자 이름 (로그용)
    fn name(&self) -> &str;

    fn close(&self);
}

/// 보강 엔진에 전달되는 GeoIP 데이터베이스 출처
#[derive(Clone)]
pub enum GeoIpSource {
    /// `geoip_database_directory`에서 찾은 데이터베이스
    Directory(PathBuf),
    /// 외부 관리자가 제공하는 데이터베이스
    Managed(Arc<dyn GeoIpProvider>),
    /// 사용할 수 있는 데이터베이스 없음
    Unavailable,
}

impl fmt::Debug for GeoIpSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory(path) => f.debug_tuple("Directory").field(path).finish(),
            Self::Managed(provider) => f.debug_tuple("Managed").field(&provider.name()).finish(),
            Self::Unavailable => f.write_str("Unavailable"),
        }
    }
}

/// 보강 엔진이 이벤트 매칭을 알리는 콜백
#[derive(Clone)]
pub struct FilterMatchListener {
    callback: Arc<dyn Fn(&mut Event) + Send + Sync>,
}

impl FilterMatchListener {
    pub fn new(callback: impl Fn(&mut Event) + Send + Sync + 'static) -> Self {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// 이벤트가 파이프라인에 매칭되었음을 알립니다.
    pub fn matched(&self, event: &mut Event) {
        (self.callback)(event);
    }
}

impl fmt::Debug for FilterMatchListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterMatchListener").finish_non_exhaustive()
    }
}

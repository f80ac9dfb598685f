//! 필터 생명주기
//!
//! [`ElasticIntegrationFilter`]는 시작 시 설정을 검증하고 협력자를 차례로 만든 뒤,
//! 실행 중에는 이벤트 배치를 보강 엔진에 넘깁니다.
//!
//! # 생명주기
//! ```text
//! Created → register() → Running → close() → Closed
//!              │
//!              └─ 실패 ─▶ Failed → close() → Closed
//! ```
//!
//! # 시작 순서
//!
//! 1. 연결 설정 검증 (네트워크 연결 전)
//! 2. 클라이언트 생성, 서버리스 클러스터면 API 버전을 고정해 다시 생성
//! 3. GeoIP 데이터베이스 출처 결정
//! 4. 보강 엔진 생성
//! 5. 사용자 권한 점검
//! 6. 라이선스 점검

use std::fmt;
use std::sync::Arc;

use elastic_integration_connection::{
    ConnectionValidator, ImmutableConnectionConfig, ValidationWarning,
};
use elastic_integration_core::config::RawConfig;
use elastic_integration_core::error::PreflightError;
use elastic_integration_core::event::Event;
use elastic_integration_core::metrics as m;
use tracing::{debug, error, info, warn};

use crate::collaborator::{
    ClientFactory, ClientOptions, ELASTIC_API_VERSION, EngineFactory, EnrichmentEngine,
    FilterMatchListener, GeoIpProvider, GeoIpSource, PreflightCheck,
};
use crate::error::FilterError;

const GEOIP_GUIDANCE: &str = "integrations that rely on the Geoip Processor will be unable to enrich events with geo data unless you either provide your own databases with `geoip_database_directory` or run with a managed geoip database provider.";

const UNSAFE_MODE_WARNING: &str = "`elastic_integration` filter is unable to verify user privileges. It has started with unsafe mode which may cause unexpected failure. Enabling security in Elasticsearch and using user authentication is recommended.";

/// 필터 생명주기 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    /// 생성됨 (register 전)
    Created,
    /// 이벤트 처리 가능
    Running,
    /// 자원 해제됨
    Closed,
    /// 시작 실패
    Failed,
}

impl fmt::Display for FilterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Running => write!(f, "running"),
            Self::Closed => write!(f, "closed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// 시작 실패 단계 (메트릭 레이블)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Validate,
    Client,
    Engine,
    Preflight,
}

impl Stage {
    fn as_str(self) -> &'static str {
        match self {
            Self::Validate => "validate",
            Self::Client => "client",
            Self::Engine => "engine",
            Self::Preflight => "preflight",
        }
    }
}

/// `elastic_integration` 필터
///
/// # 사용 예시
/// ```ignore
/// let mut filter = ElasticIntegrationFilter::builder(raw, client_factory, engine_factory)
///     .add_tag("enriched")
///     .build();
/// filter.register().await?;
/// let out = filter.multi_filter(events).await?;
/// filter.close().await;
/// ```
pub struct ElasticIntegrationFilter<C, E>
where
    C: ClientFactory,
    E: EngineFactory<C::Client>,
{
    raw: RawConfig,
    validator: ConnectionValidator,
    client_factory: C,
    engine_factory: E,
    geoip_manager: Option<Arc<dyn GeoIpProvider>>,
    add_tags: Vec<String>,
    state: FilterState,
    config: Option<ImmutableConnectionConfig>,
    warnings: Vec<ValidationWarning>,
    client: Option<C::Client>,
    geoip: Option<GeoIpSource>,
    engine: Option<E::Engine>,
}

impl<C, E> ElasticIntegrationFilter<C, E>
where
    C: ClientFactory,
    E: EngineFactory<C::Client>,
{
    pub fn builder(
        raw: RawConfig,
        client_factory: C,
        engine_factory: E,
    ) -> ElasticIntegrationFilterBuilder<C, E> {
        ElasticIntegrationFilterBuilder::new(raw, client_factory, engine_factory)
    }

    pub fn state(&self) -> FilterState {
        self.state
    }

    /// 검증이 끝난 설정 (register 성공 후에만 존재)
    pub fn config(&self) -> Option<&ImmutableConnectionConfig> {
        self.config.as_ref()
    }

    /// 검증 중 발생한 경고
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    /// 사용 중인 GeoIP 데이터베이스 출처
    pub fn geoip_source(&self) -> Option<&GeoIpSource> {
        self.geoip.as_ref()
    }

    /// 필터를 시작합니다.
    ///
    /// 어느 단계든 실패하면 그때까지 만든 자원과 검증 결과를 버리고 `Failed` 상태가 됩니다.
    pub async fn register(&mut self) -> Result<(), FilterError> {
        if self.state != FilterState::Created {
            return Err(FilterError::InvalidState {
                actual: self.state,
                expected: FilterState::Created,
            });
        }

        m::describe_all();
        match self.start().await {
            Ok(()) => {
                self.state = FilterState::Running;
                info!(
                    id = self.config.as_ref().map(ImmutableConnectionConfig::id),
                    "elastic_integration filter registered"
                );
                Ok(())
            }
            Err((stage, err)) => {
                metrics::counter!(m::STARTUP_FAILURES_TOTAL, m::LABEL_STAGE => stage.as_str())
                    .increment(1);
                error!(stage = stage.as_str(), error = %err, "elastic_integration filter failed to start");
                self.release().await;
                self.config = None;
                self.warnings.clear();
                self.state = FilterState::Failed;
                Err(err)
            }
        }
    }

    async fn start(&mut self) -> Result<(), (Stage, FilterError)> {
        // 1. 검증
        let validated = self
            .validator
            .validate(&self.raw)
            .map_err(|err| (Stage::Validate, FilterError::from(err)))?;
        for warning in &validated.warnings {
            metrics::counter!(m::VALIDATION_WARNINGS_TOTAL, m::LABEL_WARNING => warning.code())
                .increment(1);
        }
        self.warnings = validated.warnings;
        let config = &*self.config.insert(validated.config);

        // 2. 클라이언트
        let options = ClientOptions::default();
        let mut client = self
            .client_factory
            .build(config, &options)
            .await
            .map_err(|err| (Stage::Client, FilterError::from(err)))?;
        let serverless = client
            .is_serverless()
            .await
            .map_err(|err| (Stage::Client, FilterError::from(err)))?;
        if serverless {
            info!(api_version = ELASTIC_API_VERSION, "serverless cluster detected; pinning API version");
            client = self
                .client_factory
                .build(config, &options.with_api_version(ELASTIC_API_VERSION))
                .await
                .map_err(|err| (Stage::Client, FilterError::from(err)))?;
        }
        let client = &*self.client.insert(client);

        // 3. GeoIP
        let geoip = resolve_geoip(config, self.geoip_manager.as_ref());
        self.geoip = Some(geoip.clone());

        // 4. 보강 엔진
        let listener = match_listener(self.add_tags.clone());
        let engine = self
            .engine_factory
            .build(client, config, geoip, listener)
            .await
            .map_err(|err| (Stage::Engine, FilterError::from(err)))?;
        self.engine = Some(engine);

        // 5. 권한, 6. 라이선스
        check_user_privileges(client, config)
            .await
            .map_err(|err| (Stage::Preflight, err))?;
        client
            .check_license()
            .await
            .map_err(|err| (Stage::Preflight, FilterError::from(err)))?;

        Ok(())
    }

    /// 단일 이벤트 처리는 지원하지 않습니다. [`multi_filter`](Self::multi_filter)를 사용하세요.
    pub fn filter(&self, _event: Event) -> Result<Event, FilterError> {
        Err(FilterError::SingleEventUnsupported)
    }

    /// 이벤트 배치를 보강 엔진에 넘기고 결과를 돌려줍니다.
    pub async fn multi_filter(&self, events: Vec<Event>) -> Result<Vec<Event>, FilterError> {
        let engine = match (&self.state, &self.engine) {
            (FilterState::Running, Some(engine)) => engine,
            _ => {
                return Err(FilterError::InvalidState {
                    actual: self.state,
                    expected: FilterState::Running,
                });
            }
        };

        metrics::counter!(m::EVENTS_IN_TOTAL).increment(events.len() as u64);
        let out = engine.process(events).await?;
        metrics::counter!(m::EVENTS_OUT_TOTAL).increment(out.len() as u64);
        Ok(out)
    }

    /// 자원을 해제합니다. 여러 번 호출해도 안전합니다.
    pub async fn close(&mut self) {
        if self.state == FilterState::Closed {
            return;
        }
        self.release().await;
        self.state = FilterState::Closed;
        info!("elastic_integration filter closed");
    }

    /// 엔진, GeoIP 제공자, 클라이언트 순으로 해제합니다.
    async fn release(&mut self) {
        if let Some(engine) = self.engine.take() {
            engine.close().await;
            debug!("enrichment engine closed");
        }
        if let Some(GeoIpSource::Managed(provider)) = self.geoip.take() {
            provider.close();
            debug!(provider = provider.name(), "geoip provider closed");
        }
        if self.client.take().is_some() {
            debug!("client released");
        }
    }
}

impl<C, E> fmt::Debug for ElasticIntegrationFilter<C, E>
where
    C: ClientFactory,
    E: EngineFactory<C::Client>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElasticIntegrationFilter")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("geoip", &self.geoip)
            .finish_non_exhaustive()
    }
}

/// 보안이 꺼진 클러스터는 자격 증명이 없을 때만 경고 후 계속합니다.
async fn check_user_privileges<P: PreflightCheck>(
    client: &P,
    config: &ImmutableConnectionConfig,
) -> Result<(), FilterError> {
    match client.check_user_privileges().await {
        Ok(()) => Ok(()),
        Err(PreflightError::SecurityDisabled(detail)) => match config.auth().description() {
            Some(credentials) => Err(FilterError::SecurityDisabledWithCredentials {
                credentials,
                detail: PreflightError::SecurityDisabled(detail).to_string(),
            }),
            None => {
                warn!("{UNSAFE_MODE_WARNING}");
                Ok(())
            }
        },
        Err(err) => Err(err.into()),
    }
}

fn resolve_geoip(
    config: &ImmutableConnectionConfig,
    manager: Option<&Arc<dyn GeoIpProvider>>,
) -> GeoIpSource {
    match (config.geoip_database_directory(), manager) {
        (Some(directory), _) => {
            debug!(directory = %directory.display(), "discovering geoip databases");
            GeoIpSource::Directory(directory.to_path_buf())
        }
        (None, Some(manager)) => {
            info!(provider = manager.name(), "using managed geoip databases");
            GeoIpSource::Managed(Arc::clone(manager))
        }
        (None, None) => {
            warn!("Geoip database management is not available; {GEOIP_GUIDANCE}");
            GeoIpSource::Unavailable
        }
    }
}

fn match_listener(add_tags: Vec<String>) -> FilterMatchListener {
    FilterMatchListener::new(move |event| {
        metrics::counter!(m::EVENTS_MATCHED_TOTAL).increment(1);
        for tag in &add_tags {
            event.add_tag(tag);
        }
    })
}

/// [`ElasticIntegrationFilter`] 빌더
pub struct ElasticIntegrationFilterBuilder<C, E> {
    raw: RawConfig,
    client_factory: C,
    engine_factory: E,
    validator: Option<ConnectionValidator>,
    geoip_manager: Option<Arc<dyn GeoIpProvider>>,
    add_tags: Vec<String>,
}

impl<C, E> ElasticIntegrationFilterBuilder<C, E>
where
    C: ClientFactory,
    E: EngineFactory<C::Client>,
{
    pub fn new(raw: RawConfig, client_factory: C, engine_factory: E) -> Self {
        Self {
            raw,
            client_factory,
            engine_factory,
            validator: None,
            geoip_manager: None,
            add_tags: Vec::new(),
        }
    }

    /// 검증기를 지정합니다. 기본값은 [`ConnectionValidator::new`]입니다.
    pub fn validator(mut self, validator: ConnectionValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// `geoip_database_directory`가 없을 때 쓸 관리형 GeoIP 제공자를 지정합니다.
    pub fn geoip_manager(mut self, manager: Arc<dyn GeoIpProvider>) -> Self {
        self.geoip_manager = Some(manager);
        self
    }

    /// 매칭된 이벤트에 붙일 태그를 추가합니다.
    pub fn add_tag(mut self, tag: impl Into<String>) -> Self {
        self.add_tags.push(tag.into());
        self
    }

    pub fn build(self) -> ElasticIntegrationFilter<C, E> {
        ElasticIntegrationFilter {
            raw: self.raw,
            validator: self.validator.unwrap_or_default(),
            client_factory: self.client_factory,
            engine_factory: self.engine_factory,
            geoip_manager: self.geoip_manager,
            add_tags: self.add_tags,
            state: FilterState::Created,
            config: None,
            warnings: Vec::new(),
            client: None,
            geoip: None,
            engine: None,
        }
    }
}

//! # elastic-integration-filter
//!
//! `elastic_integration` 필터의 생명주기 어댑터입니다.
//! 시작 시 연결 설정을 검증하고, 외부 협력자(클라이언트, 보강 엔진, GeoIP)를
//! 정해진 순서로 만든 뒤 원격 클러스터를 사전 점검합니다.
//!
//! # Module Structure
//!
//! - [`collaborator`]: 외부 협력자 trait (`ClientFactory`, `EngineFactory`, `PreflightCheck` 등)
//! - [`filter`]: 필터 생명주기 (`ElasticIntegrationFilter`)
//! - [`error`]: 필터 에러 (`FilterError`)

pub mod collaborator;
pub mod error;
pub mod filter;

// --- Public API Re-exports ---

pub use collaborator::{
    ClientFactory, ClientOptions, ELASTIC_API_VERSION, EngineFactory, EnrichmentEngine,
    FilterMatchListener, GeoIpProvider, GeoIpSource, PreflightCheck, user_agent,
};
pub use error::FilterError;
pub use filter::{ElasticIntegrationFilter, ElasticIntegrationFilterBuilder, FilterState};

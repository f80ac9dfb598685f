//! # elastic-integration-connection
//!
//! 연결 설정 검증 및 정규화 엔진입니다.
//! 시작 시 한 번, 동기적으로 실행되며 네트워크 클라이언트나 보강 엔진이
//! 만들어지기 전에 설정의 모든 모순을 잡아냅니다.
//!
//! # Module Structure
//!
//! - [`error`]: 검증 에러 (`ValidationError`)
//! - [`warning`]: 시작을 막지 않는 경고 (`ValidationWarning`)
//! - [`access`]: 자격 증명 경로 접근성 검사 (`PathProbe`)
//! - [`endpoint`]: 엔드포인트 URI 파싱 (`EndpointUri`)
//! - [`connection`]: `hosts`/`cloud_id` 선결 조건 (`ConnectionTarget`)
//! - [`tls`]: TLS 설정 검증 (`TlsState`)
//! - [`hosts`]: TLS 추론과 호스트 정규화
//! - [`auth`]: 인증 설정 검증 (`AuthState`)
//! - [`immutable`]: 최종 불변 설정 (`ImmutableConnectionConfig`)
//! - [`validator`]: 검증 파이프라인 (`ConnectionValidator`)
//!
//! # 사용 예시
//!
//! ```no_run
//! use elastic_integration_core::config::IntegrationConfig;
//! use elastic_integration_connection::ConnectionValidator;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = IntegrationConfig::parse("[elastic_integration]\nhosts = [\"es.local\"]")?;
//! let validated = ConnectionValidator::new().validate(&config.elastic_integration)?;
//! for host in validated.config.hosts().unwrap_or_default() {
//!     println!("{host}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod access;
pub mod auth;
pub mod connection;
pub mod endpoint;
pub mod error;
pub mod hosts;
pub mod immutable;
pub mod tls;
pub mod validator;
pub mod warning;

// --- Public API Re-exports ---

pub use access::{FsPathProbe, PathProbe, ensure_readable_and_non_writable};
pub use auth::{ApiKey, AuthState, CloudAuth, validate_auth};
pub use connection::{ConnectionTarget, validate_connection_settings};
pub use endpoint::EndpointUri;
pub use error::ValidationError;
pub use hosts::{infer_ssl_enabled, normalize_hosts};
pub use immutable::{ImmutableConnectionConfig, ImmutableConnectionConfigBuilder};
pub use tls::{IdentityMaterial, SystemTrust, TlsState, TrustMaterial, VerificationMode, validate_ssl};
pub use validator::{ConnectionValidator, ConnectionValidatorBuilder, Validated, validate};
pub use warning::ValidationWarning;

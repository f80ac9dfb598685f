//! # elastic-integration-core
//!
//! `elastic_integration` 필터의 공통 타입 크레이트입니다.
//!
//! - [`error`]: 최상위 에러와 검증 실패 분류 ([`ErrorKind`])
//! - [`options`]: 인식하는 옵션 테이블
//! - [`config`]: 설정 파일 파싱과 검증 전 연결 설정 ([`RawConfig`])
//! - [`secret`]: 출력되지 않는 비밀 값 ([`Password`])
//! - [`event`]: 보강 엔진과 주고받는 이벤트
//! - [`metrics`]: 메트릭 이름 상수

pub mod config;
pub mod error;
pub mod event;
pub mod metrics;
pub mod options;
pub mod secret;

// --- 주요 타입 re-export ---

// 에러
pub use error::{
    ClientError, ConfigError, EngineError, ErrorKind, IntegrationError, PreflightError,
};

// 설정
pub use config::{FilterOptions, GeneralConfig, IntegrationConfig, RawConfig};

// 옵션 테이블
pub use options::{OPTIONS, OptionKind, OptionSpec};

// 비밀 값
pub use secret::Password;

// 이벤트
pub use event::Event;

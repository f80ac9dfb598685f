//! 메트릭 상수 및 설명 등록
//!
//! 필터 컴포넌트가 기록하는 모든 메트릭의 이름을 한 곳에서 정의합니다.
//! 익스포터는 설치하지 않으며, 임베딩 프로세스가 레코더를 소유합니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `elastic_integration_`
//! - 접미어: `_total` (counter)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(elastic_integration_core::metrics::EVENTS_IN_TOTAL).increment(batch.len() as u64);
//! ```

use metrics::describe_counter;

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 시작 실패 단계 레이블 키 (validate, client, engine, preflight)
pub const LABEL_STAGE: &str = "stage";

/// 경고 종류 레이블 키
pub const LABEL_WARNING: &str = "warning";

// ─── 필터 메트릭 ────────────────────────────────────────────────────

/// 보강 엔진에 전달된 이벤트 수 (counter)
pub const EVENTS_IN_TOTAL: &str = "elastic_integration_events_in_total";

/// 보강 엔진이 돌려준 이벤트 수 (counter)
pub const EVENTS_OUT_TOTAL: &str = "elastic_integration_events_out_total";

/// 파이프라인에 매칭된 이벤트 수 (counter)
pub const EVENTS_MATCHED_TOTAL: &str = "elastic_integration_events_matched_total";

/// 시작 실패 수 (counter, label: stage)
pub const STARTUP_FAILURES_TOTAL: &str = "elastic_integration_startup_failures_total";

/// 설정 검증 경고 수 (counter, label: warning)
pub const VALIDATION_WARNINGS_TOTAL: &str = "elastic_integration_validation_warnings_total";

/// 모든 메트릭의 설명을 등록합니다.
///
/// 레코더가 설치되어 있지 않아도 안전하게 호출할 수 있습니다.
pub fn describe_all() {
    describe_counter!(
        EVENTS_IN_TOTAL,
        "Total number of events handed to the enrichment engine"
    );
    describe_counter!(
        EVENTS_OUT_TOTAL,
        "Total number of events returned by the enrichment engine"
    );
    describe_counter!(
        EVENTS_MATCHED_TOTAL,
        "Total number of events reported as matched by the enrichment engine"
    );
    describe_counter!(
        STARTUP_FAILURES_TOTAL,
        "Total number of aborted startups by stage"
    );
    describe_counter!(
        VALIDATION_WARNINGS_TOTAL,
        "Total number of non-fatal configuration warnings"
    );
}

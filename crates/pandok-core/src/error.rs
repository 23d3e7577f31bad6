//! PANDOK 핵심 에러 타입.
//!
//! 클라우드 OCR 호출의 모든 실패는 이 닫힌 집합 중 정확히 하나로 분류된다.
//! 어댑터 crate는 새 variant를 추가하지 않고 이 타입을 그대로 반환한다.

use thiserror::Error;

/// OCR 파이프라인 에러.
/// 설정/검증 단계와 제출/폴링 단계의 실패를 구분한다.
#[derive(Debug, Error)]
pub enum OcrError {
    /// 엔드포인트/자격증명 누락 또는 HTTP 클라이언트 구성 실패
    #[error("설정 에러: {0}")]
    Configuration(String),

    /// 요청 유효성 검증 실패 (네트워크 호출 전에 발생)
    #[error("유효성 검증 실패 — {field}: {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 제출 요청 실패 (전송 오류 또는 비정상 상태 코드)
    #[error("제출 실패: {detail}")]
    SubmissionFailed {
        /// 상태 코드와 응답 본문 요약
        detail: String,
    },

    /// 제출 성공 응답에 작업 핸들 헤더가 없거나 비어 있음
    #[error("작업 핸들 누락 — 제출 응답에 Operation-Location 헤더 없음")]
    MissingOperationHandle,

    /// 폴링 요청 실패 (전송 오류, 비정상 상태 코드, 파싱 불가 응답)
    #[error("폴링 전송 에러: {detail}")]
    PollTransport {
        /// 실패 원인 요약
        detail: String,
    },

    /// 벤더가 작업 종료 상태 failed를 보고함
    #[error("원격 작업 실패: {detail}")]
    OperationFailed {
        /// 벤더 응답 본문 요약
        detail: String,
    },

    /// 폴링 횟수 소진 — 작업이 종료 상태에 도달하지 못함
    #[error("폴링 타임아웃: {attempts}회 시도 후에도 작업 미완료")]
    Timeout {
        /// 소진된 폴링 횟수
        attempts: u32,
    },

    /// 취소 토큰에 의해 중단됨
    #[error("작업 취소됨")]
    Cancelled,
}

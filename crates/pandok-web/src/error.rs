//! API 에러 처리.
//!
//! `OcrError`를 게이트웨이 HTTP 상태 코드로 매핑한다:
//! 검증 400, 설정 500, 업스트림 실패 502, 취소 503, 타임아웃 504.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pandok_core::error::OcrError;
use serde::Serialize;
use thiserror::Error;

/// API 에러
#[derive(Debug, Error)]
pub enum ApiError {
    /// 잘못된 요청 (400)
    #[error("잘못된 요청: {0}")]
    BadRequest(String),

    /// 내부 서버 오류 (500)
    #[error("내부 서버 오류: {0}")]
    Internal(String),

    /// 업스트림 벤더 호출 실패 (502)
    #[error("업스트림 호출 실패: {0}")]
    UpstreamFailure(String),

    /// 서비스 일시 불가 — 종료 중 취소 등 (503)
    #[error("서비스 일시 불가: {0}")]
    Unavailable(String),

    /// 업스트림 작업 시간 초과 (504)
    #[error("업스트림 응답 시간 초과: {0}")]
    UpstreamTimeout(String),
}

/// 에러 응답 본문
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// 에러 메시지
    pub error: String,
    /// HTTP 상태 코드
    pub status: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            ApiError::UpstreamFailure(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            ApiError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            ApiError::UpstreamTimeout(msg) => (StatusCode::GATEWAY_TIMEOUT, msg.clone()),
        };

        let body = ErrorResponse {
            error: message,
            status: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<OcrError> for ApiError {
    fn from(err: OcrError) -> Self {
        match &err {
            OcrError::Validation { .. } => ApiError::BadRequest(err.to_string()),
            OcrError::Configuration(_) => ApiError::Internal(err.to_string()),
            OcrError::Timeout { .. } => ApiError::UpstreamTimeout(err.to_string()),
            OcrError::Cancelled => ApiError::Unavailable(err.to_string()),
            OcrError::SubmissionFailed { .. }
            | OcrError::MissingOperationHandle
            | OcrError::PollTransport { .. }
            | OcrError::OperationFailed { .. } => ApiError::UpstreamFailure(err.to_string()),
        }
    }
}

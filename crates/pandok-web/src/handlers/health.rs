//! 헬스 체크 핸들러.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::AppState;

/// 헬스 체크 응답 DTO
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// 서버 상태 ("ok" 고정)
    pub status: &'static str,
    /// 활성 OCR 제공자 이름
    pub provider: String,
}

/// 게이트웨이 헬스 체크
///
/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        provider: state.provider.provider_name().to_string(),
    })
}

//! OCR 추출 API 핸들러.

use axum::extract::State;
use axum::Json;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::debug;

use pandok_core::models::ocr::{ImageFormat, OcrRequest};

use crate::error::ApiError;
use crate::AppState;

/// OCR 추출 요청 DTO
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrExtractRequest {
    /// base64 인코딩 이미지 (`data:*;base64,` 접두사 허용)
    pub image_base64: String,
    /// 이미지 MIME 타입 (기본: image/png)
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// OCR 추출 응답 DTO
#[derive(Debug, Serialize)]
pub struct OcrExtractResponse {
    /// 평탄화된 전체 텍스트
    pub text: String,
}

/// 이미지에서 문서 텍스트 추출
///
/// POST /api/ocr
pub async fn extract_text(
    State(state): State<AppState>,
    Json(payload): Json<OcrExtractRequest>,
) -> Result<Json<OcrExtractResponse>, ApiError> {
    let encoded = strip_data_url_prefix(payload.image_base64.trim());
    if encoded.is_empty() {
        return Err(ApiError::BadRequest("imageBase64가 비어 있음".to_string()));
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| ApiError::BadRequest(format!("imageBase64 디코딩 실패: {}", e)))?;

    let format = payload
        .mime_type
        .as_deref()
        .map(ImageFormat::from_mime)
        .unwrap_or_default();

    let request = OcrRequest::new(bytes, format)?;

    debug!(
        provider = state.provider.provider_name(),
        image_size = request.image().len(),
        "OCR 추출 요청"
    );

    // 요청별 자식 토큰 — 서버 종료 시 루트 취소로 함께 중단된다
    let cancel = state.cancel.child_token();
    let outcome = state.provider.extract_text(&request, &cancel).await?;

    Ok(Json(OcrExtractResponse { text: outcome.text }))
}

/// data URL 접두사 제거 ("data:image/png;base64,AAAA" → "AAAA")
fn strip_data_url_prefix(encoded: &str) -> &str {
    if encoded.starts_with("data:") {
        match encoded.split_once(";base64,") {
            Some((_, rest)) => rest,
            None => encoded,
        }
    } else {
        encoded
    }
}

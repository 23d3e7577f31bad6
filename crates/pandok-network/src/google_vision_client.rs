//! Google Cloud Vision 클라이언트 (단일 호출형).
//!
//! base64 인코딩한 이미지를 `images:annotate`에 한 번 POST하고 응답의
//! `responses[0].fullTextAnnotation.text`를 읽는다. 해당 필드가 없으면
//! 빈 문자열로 성공 처리한다 (텍스트 없는 이미지).

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use pandok_core::config::GoogleVisionConfig;
use pandok_core::error::OcrError;
use pandok_core::models::ocr::{OcrRequest, OcrResult};
use pandok_core::ports::ocr_provider::OcrProvider;

/// 주석 요청 경로
const IMAGES_ANNOTATE_PATH: &str = "/v1/images:annotate";

/// API 키 헤더
const API_KEY_HEADER: &str = "x-goog-api-key";

/// 문서 텍스트 추출 feature
const TEXT_DETECTION_FEATURE: &str = "DOCUMENT_TEXT_DETECTION";

/// Google Cloud Vision 클라이언트 — `OcrProvider` 포트 구현
///
/// 폴링 단계가 없으므로 모든 전송/상태/파싱 실패는 제출 실패로 분류한다.
/// 벤더가 `responses[0].error`로 작업 실패를 보고한 경우만 예외다.
#[derive(Debug)]
pub struct GoogleVisionProvider {
    /// HTTP 클라이언트
    http_client: reqwest::Client,
    /// API 베이스 URL (끝 슬래시 제거됨)
    endpoint: String,
    /// API 키 (메모리에만 유지)
    api_key: String,
}

impl GoogleVisionProvider {
    /// 새 GoogleVisionProvider 생성
    ///
    /// 엔드포인트/키가 비어 있으면 네트워크 호출 없이 즉시 실패한다.
    pub fn new(config: &GoogleVisionConfig) -> Result<Self, OcrError> {
        if config.endpoint.trim().is_empty() {
            return Err(OcrError::Configuration(
                "Google Vision 엔드포인트 미설정".into(),
            ));
        }
        if config.api_key.trim().is_empty() {
            return Err(OcrError::Configuration(
                "Google API 키 미설정 (GOOGLE_VISION_KEY 또는 설정 파일)".into(),
            ));
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| OcrError::Configuration(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        debug!(
            endpoint = %config.endpoint,
            timeout = config.timeout_secs,
            "GoogleVisionProvider 초기화"
        );

        Ok(Self {
            http_client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// 응답 본문에서 전체 텍스트 추출
    ///
    /// `responses[0].fullTextAnnotation.text` 체인의 어느 고리가 없어도
    /// 빈 문자열이다. `responses[0].error`가 있으면 작업 실패로 본다.
    fn parse_full_text(body: &str) -> Result<String, OcrError> {
        let response: serde_json::Value =
            serde_json::from_str(body).map_err(|e| OcrError::SubmissionFailed {
                detail: format!("응답 JSON 파싱 실패: {}", e),
            })?;

        let first = response
            .get("responses")
            .and_then(|r| r.as_array())
            .and_then(|r| r.first());

        if let Some(error) = first.and_then(|r| r.get("error")) {
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("원인 미상");
            return Err(OcrError::OperationFailed {
                detail: message.to_string(),
            });
        }

        let text = first
            .and_then(|r| r.get("fullTextAnnotation"))
            .and_then(|a| a.get("text"))
            .and_then(|t| t.as_str())
            .unwrap_or_default();

        Ok(text.to_string())
    }
}

#[async_trait]
impl OcrProvider for GoogleVisionProvider {
    async fn extract_text(
        &self,
        request: &OcrRequest,
        cancel: &CancellationToken,
    ) -> Result<OcrResult, OcrError> {
        use base64::Engine;

        // 이미 취소된 토큰이면 요청 전에 종료
        if cancel.is_cancelled() {
            return Err(OcrError::Cancelled);
        }

        let encoded = base64::engine::general_purpose::STANDARD.encode(request.image());
        let request_body = serde_json::json!({
            "requests": [{
                "image": { "content": encoded },
                "features": [{ "type": TEXT_DETECTION_FEATURE }]
            }]
        });

        let url = format!("{}{}", self.endpoint, IMAGES_ANNOTATE_PATH);
        debug!(url = %url, image_size = request.image().len(), "주석 요청 호출");

        let send = self
            .http_client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request_body)
            .send();

        // 단일 호출이므로 전송 자체를 취소 토큰과 경합시킨다
        let response = tokio::select! {
            _ = cancel.cancelled() => {
                debug!("요청 전송 중 취소됨");
                return Err(OcrError::Cancelled);
            }
            result = send => result.map_err(|e| OcrError::SubmissionFailed {
                detail: format!("주석 요청 전송 실패: {}", e),
            })?,
        };

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| OcrError::SubmissionFailed {
                detail: format!("응답 읽기 실패: {}", e),
            })?;

        if !status.is_success() {
            warn!(status = %status, "주석 오류 응답");
            return Err(OcrError::SubmissionFailed {
                detail: format!("({}) {}", status, body.chars().take(200).collect::<String>()),
            });
        }

        let text = Self::parse_full_text(&body)?;
        debug!(text_len = text.len(), "텍스트 추출 완료");
        Ok(OcrResult::succeeded(text))
    }

    fn provider_name(&self) -> &str {
        "google-vision"
    }
}

// ============================================================
// 테스트
// ============================================================

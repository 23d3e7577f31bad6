//! Azure Read API 클라이언트 (제출/폴링형).
//!
//! 이미지 바이트를 `read/analyze`에 제출하고, 응답의 `Operation-Location`
//! 헤더가 가리키는 작업 URL을 고정 주기로 폴링하여 종료 상태를 기다린다.
//! 성공 시 페이지/줄 구조를 "\n" 결합 문자열로 평탄화한다.

use async_trait::async_trait;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use pandok_core::config::AzureReadConfig;
use pandok_core::error::OcrError;
use pandok_core::models::ocr::{OcrRequest, OcrResult, OperationHandle, PollStatus};
use pandok_core::ports::ocr_provider::OcrProvider;

/// 제출 경로 (Read API v3.2)
const READ_ANALYZE_PATH: &str = "/vision/v3.2/read/analyze";

/// 구독 키 헤더
const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// 작업 핸들 헤더
const OPERATION_LOCATION_HEADER: &str = "Operation-Location";

// ============================================================
// 폴링 응답 와이어 모델
// ============================================================

/// 폴링 응답 본문
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReadOperation {
    /// 작업 상태
    status: PollStatus,
    /// 분석 결과 — succeeded 외의 상태에서는 생략됨
    #[serde(default)]
    analyze_result: Option<ReadAnalyzeResult>,
}

/// 분석 결과 — 페이지 목록
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReadAnalyzeResult {
    #[serde(default)]
    read_results: Vec<ReadPage>,
}

/// 페이지 — 인식된 줄 목록
#[derive(Debug, Default, Deserialize)]
struct ReadPage {
    #[serde(default)]
    lines: Vec<ReadLine>,
}

/// 인식된 한 줄
#[derive(Debug, Deserialize)]
struct ReadLine {
    text: String,
}

// ============================================================
// AzureReadProvider — 제출/폴링형 OCR 클라이언트
// ============================================================

/// Azure Read API 클라이언트 — `OcrProvider` 포트 구현
///
/// 프로토콜: 제출(POST, 원시 바이트 본문) → `Operation-Location` 핸들 수신
/// → 고정 주기 폴링(GET, 매 시도 대기 후 요청) → 종료 상태 도달 시 평탄화.
/// 재시도/백오프 없음: 주기와 최대 횟수는 설정값 그대로 따른다.
#[derive(Debug)]
pub struct AzureReadProvider {
    /// HTTP 클라이언트
    http_client: reqwest::Client,
    /// 리소스 엔드포인트 (끝 슬래시 제거됨)
    endpoint: String,
    /// 구독 키 (메모리에만 유지)
    api_key: String,
    /// 폴링 주기
    poll_interval: std::time::Duration,
    /// 최대 폴링 횟수
    max_poll_attempts: u32,
}

impl AzureReadProvider {
    /// 새 AzureReadProvider 생성
    ///
    /// 엔드포인트/구독 키가 비어 있으면 네트워크 호출 없이 즉시 실패한다.
    pub fn new(config: &AzureReadConfig) -> Result<Self, OcrError> {
        if config.endpoint.trim().is_empty() {
            return Err(OcrError::Configuration(
                "Azure 엔드포인트 미설정 (AZURE_VISION_ENDPOINT 또는 설정 파일)".into(),
            ));
        }
        if config.api_key.trim().is_empty() {
            return Err(OcrError::Configuration(
                "Azure 구독 키 미설정 (AZURE_VISION_KEY 또는 설정 파일)".into(),
            ));
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| OcrError::Configuration(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        debug!(
            endpoint = %config.endpoint,
            poll_interval_ms = config.poll_interval_ms,
            max_poll_attempts = config.max_poll_attempts,
            "AzureReadProvider 초기화"
        );

        Ok(Self {
            http_client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            poll_interval: config.poll_interval(),
            max_poll_attempts: config.max_poll_attempts,
        })
    }

    /// 읽기 작업 제출 — 작업 핸들 수신
    async fn submit(&self, request: &OcrRequest) -> Result<OperationHandle, OcrError> {
        let url = format!("{}{}", self.endpoint, READ_ANALYZE_PATH);

        debug!(url = %url, image_size = request.image().len(), "읽기 작업 제출");

        let response = self
            .http_client
            .post(&url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
            .header(reqwest::header::CONTENT_TYPE, request.format().mime_type())
            .body(request.image().to_vec())
            .send()
            .await
            .map_err(|e| OcrError::SubmissionFailed {
                detail: format!("제출 요청 전송 실패: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "제출 오류 응답");
            return Err(OcrError::SubmissionFailed {
                detail: format!("({}) {}", status, body.chars().take(200).collect::<String>()),
            });
        }

        let handle = response
            .headers()
            .get(OPERATION_LOCATION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(OperationHandle::new)
            .ok_or(OcrError::MissingOperationHandle)?;

        debug!(handle = %handle, "작업 핸들 수신");
        Ok(handle)
    }

    /// 종료 상태까지 폴링
    ///
    /// 매 시도마다 주기만큼 먼저 대기한 후 GET한다. 대기는 취소 토큰과
    /// 경합하며, 취소되면 추가 요청 없이 즉시 반환한다.
    async fn poll_until_terminal(
        &self,
        handle: &OperationHandle,
        cancel: &CancellationToken,
    ) -> Result<ReadAnalyzeResult, OcrError> {
        for attempt in 1..=self.max_poll_attempts {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(attempt, "폴링 대기 중 취소됨");
                    return Err(OcrError::Cancelled);
                }
                _ = tokio::time::sleep(self.poll_interval) => {}
            }

            let response = self
                .http_client
                .get(handle.as_str())
                .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
                .send()
                .await
                .map_err(|e| OcrError::PollTransport {
                    detail: format!("폴링 요청 전송 실패: {}", e),
                })?;

            let status = response.status();
            let body = response.text().await.map_err(|e| OcrError::PollTransport {
                detail: format!("폴링 응답 읽기 실패: {}", e),
            })?;

            if !status.is_success() {
                warn!(status = %status, attempt, "폴링 오류 응답");
                return Err(OcrError::PollTransport {
                    detail: format!("({}) {}", status, body.chars().take(200).collect::<String>()),
                });
            }

            let operation: ReadOperation =
                serde_json::from_str(&body).map_err(|e| OcrError::PollTransport {
                    detail: format!("폴링 응답 파싱 실패: {}", e),
                })?;

            match operation.status {
                PollStatus::Succeeded => {
                    debug!(attempt, "읽기 작업 성공");
                    // succeeded인데 analyzeResult가 없으면 빈 결과로 취급
                    return Ok(operation.analyze_result.unwrap_or_default());
                }
                PollStatus::Failed => {
                    warn!(attempt, "읽기 작업 실패 보고");
                    return Err(OcrError::OperationFailed {
                        detail: body.chars().take(200).collect::<String>(),
                    });
                }
                PollStatus::NotStarted | PollStatus::Running => {
                    debug!(attempt, status = ?operation.status, "작업 진행 중, 폴링 계속");
                }
            }
        }

        Err(OcrError::Timeout {
            attempts: self.max_poll_attempts,
        })
    }

    /// 페이지/줄 구조 평탄화
    ///
    /// 모든 페이지의 줄을 순서대로 "\n"으로 결합한다. 끝에 개행을 붙이지
    /// 않으며, 줄이 하나도 없으면 빈 문자열이다.
    fn flatten_text(result: &ReadAnalyzeResult) -> String {
        let mut lines = Vec::new();
        for page in &result.read_results {
            for line in &page.lines {
                lines.push(line.text.as_str());
            }
        }
        lines.join("\n")
    }
}

#[async_trait]
impl OcrProvider for AzureReadProvider {
    async fn extract_text(
        &self,
        request: &OcrRequest,
        cancel: &CancellationToken,
    ) -> Result<OcrResult, OcrError> {
        // 이미 취소된 토큰이면 제출 전에 종료
        if cancel.is_cancelled() {
            return Err(OcrError::Cancelled);
        }

        let handle = self.submit(request).await?;
        let analysis = self.poll_until_terminal(&handle, cancel).await?;
        let text = Self::flatten_text(&analysis);

        debug!(text_len = text.len(), "텍스트 추출 완료");
        Ok(OcrResult::succeeded(text))
    }

    fn provider_name(&self) -> &str {
        "azure-read"
    }
}

// ============================================================
// 테스트
// ============================================================

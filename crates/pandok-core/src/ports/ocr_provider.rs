//! OCR 제공자 포트.
//!
//! 클라우드 OCR 서비스를 추상화하는 인터페이스를 정의한다.
//! 제출/폴링형과 단일 호출형 구현체가 같은 포트 뒤에 선다.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::OcrError;
use crate::models::ocr::{OcrRequest, OcrResult};

/// 클라우드 OCR 제공자 — 제출/폴링형 또는 단일 호출형
///
/// 구현체: `AzureReadProvider` (제출 후 폴링), `GoogleVisionProvider` (단일 호출)
#[async_trait]
pub trait OcrProvider: Send + Sync {
    /// 이미지에서 문서 전체 텍스트 추출
    ///
    /// - `request`: 검증된 이미지 바이트와 포맷
    /// - `cancel`: 취소 토큰. 진입 시 검사하며 모든 대기 구간에서 경합한다.
    ///   이미 취소된 토큰이면 네트워크 호출 없이 [`OcrError::Cancelled`].
    async fn extract_text(
        &self,
        request: &OcrRequest,
        cancel: &CancellationToken,
    ) -> Result<OcrResult, OcrError>;

    /// 제공자 이름 (예: "azure-read", "google-vision")
    fn provider_name(&self) -> &str;
}

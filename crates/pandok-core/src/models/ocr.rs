//! OCR 요청/결과 모델.
//!
//! 검증된 이미지 요청, 이미지 포맷, 장기 실행 읽기 작업의 핸들과 상태,
//! 추출 결과를 정의한다.

use crate::error::OcrError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 지원 이미지 포맷
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG (기본값)
    #[default]
    Png,
    /// JPEG
    Jpeg,
    /// WebP
    Webp,
}

impl ImageFormat {
    /// MIME 타입 문자열
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Webp => "image/webp",
        }
    }

    /// MIME 타입 문자열에서 변환 (미지원 타입은 기본값 PNG)
    pub fn from_mime(mime: &str) -> Self {
        match mime.trim() {
            "image/jpeg" | "image/jpg" => ImageFormat::Jpeg,
            "image/webp" => ImageFormat::Webp,
            _ => ImageFormat::Png,
        }
    }
}

/// OCR 요청 — 검증된 이미지 바이트와 포맷
///
/// 생성자가 빈 이미지를 거부하므로 제공자 구현은 네트워크 호출 전에
/// 유효한 바이트를 보장받는다.
#[derive(Debug, Clone)]
pub struct OcrRequest {
    image: Vec<u8>,
    format: ImageFormat,
}

impl OcrRequest {
    /// 새 OCR 요청 생성 (빈 이미지는 거부)
    pub fn new(image: Vec<u8>, format: ImageFormat) -> Result<Self, OcrError> {
        if image.is_empty() {
            return Err(OcrError::Validation {
                field: "image".to_string(),
                message: "이미지 바이트가 비어 있음".to_string(),
            });
        }
        Ok(Self { image, format })
    }

    /// 이미지 바이트
    pub fn image(&self) -> &[u8] {
        &self.image
    }

    /// 이미지 포맷
    pub fn format(&self) -> ImageFormat {
        self.format
    }
}

/// 장기 실행 읽기 작업 핸들
///
/// 제출 응답의 `Operation-Location` 헤더 값. 폴링 URL로 그대로 사용하며
/// 클라이언트는 내용을 해석하거나 재작성하지 않는다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationHandle(String);

impl OperationHandle {
    /// 헤더 값으로부터 핸들 생성
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// 폴링 대상 URL
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 장기 실행 작업 상태 (벤더 camelCase 직렬화)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PollStatus {
    /// 큐 대기 중
    NotStarted,
    /// 처리 중
    Running,
    /// 성공 종료
    Succeeded,
    /// 실패 종료
    Failed,
}

impl PollStatus {
    /// 종료 상태 여부 (succeeded | failed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, PollStatus::Succeeded | PollStatus::Failed)
    }
}

/// OCR 추출 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResult {
    /// 평탄화된 전체 텍스트 — 모든 페이지의 줄을 순서대로 "\n"으로 결합,
    /// 끝에 개행 없음, 빈 결과는 ""
    pub text: String,
    /// 결과를 만든 종료 상태
    pub status: PollStatus,
}

impl OcrResult {
    /// 성공 종료 결과 생성
    pub fn succeeded(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            status: PollStatus::Succeeded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_image_rejected_before_any_network() {
        let err = OcrRequest::new(Vec::new(), ImageFormat::Png).unwrap_err();
        assert!(matches!(err, OcrError::Validation { ref field, .. } if field == "image"));
    }

    #[test]
    fn request_keeps_bytes_and_format() {
        let request = OcrRequest::new(vec![1, 2, 3], ImageFormat::Jpeg).unwrap();
        assert_eq!(request.image(), &[1, 2, 3]);
        assert_eq!(request.format(), ImageFormat::Jpeg);
    }

    #[test]
    fn mime_mapping() {
        assert_eq!(ImageFormat::Png.mime_type(), "image/png");
        assert_eq!(ImageFormat::from_mime("image/jpeg"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_mime("image/jpg"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_mime("image/webp"), ImageFormat::Webp);
        // 미지원 타입은 기본값으로
        assert_eq!(ImageFormat::from_mime("image/tiff"), ImageFormat::Png);
        assert_eq!(ImageFormat::default(), ImageFormat::Png);
    }

    #[test]
    fn poll_status_uses_vendor_camel_case() {
        let status: PollStatus = serde_json::from_str("\"notStarted\"").unwrap();
        assert_eq!(status, PollStatus::NotStarted);
        let status: PollStatus = serde_json::from_str("\"running\"").unwrap();
        assert_eq!(status, PollStatus::Running);
        let status: PollStatus = serde_json::from_str("\"succeeded\"").unwrap();
        assert_eq!(status, PollStatus::Succeeded);
        let status: PollStatus = serde_json::from_str("\"failed\"").unwrap();
        assert_eq!(status, PollStatus::Failed);
    }

    #[test]
    fn terminal_states() {
        assert!(!PollStatus::NotStarted.is_terminal());
        assert!(!PollStatus::Running.is_terminal());
        assert!(PollStatus::Succeeded.is_terminal());
        assert!(PollStatus::Failed.is_terminal());
    }

    #[test]
    fn operation_handle_is_opaque() {
        let handle = OperationHandle::new("https://r.example.com/read/analyzeResults/abc");
        assert_eq!(handle.as_str(), "https://r.example.com/read/analyzeResults/abc");
        assert_eq!(handle.to_string(), handle.as_str());
    }
}

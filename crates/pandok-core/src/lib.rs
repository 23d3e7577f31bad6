//! # pandok-core
//!
//! PANDOK 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`] — 도메인 데이터 구조체 (serde Serialize/Deserialize)
//! - [`ports`] — Hexagonal Architecture 포트 인터페이스 (async_trait)
//! - [`error`] — 핵심 에러 타입 (thiserror)
//! - [`config`] — 애플리케이션 설정 구조체
//! - [`config_manager`] — 설정 파일 관리 (로드/환경 변수 오버라이드)

pub mod config;
pub mod config_manager;
pub mod error;
pub mod models;
pub mod ports;

#[cfg(test)]
mod tests {
    use crate::models::ocr::{OcrResult, PollStatus};

    #[test]
    fn ocr_result_serde_roundtrip() {
        let result = OcrResult {
            text: "총 합계\n12,000원".to_string(),
            status: PollStatus::Succeeded,
        };

        let json = serde_json::to_string(&result).unwrap();
        let deserialized: OcrResult = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.text, "총 합계\n12,000원");
        assert_eq!(deserialized.status, PollStatus::Succeeded);
        // 상태는 벤더 camelCase로 직렬화된다
        assert!(json.contains("\"succeeded\""));
    }

    #[test]
    fn config_defaults() {
        let config = crate::config::AppConfig::default_config();
        assert_eq!(config.web.port, 9090);
        assert!(!config.web.allow_external);
        assert_eq!(config.ocr.azure.poll_interval_ms, 1_000);
        assert_eq!(config.ocr.azure.max_poll_attempts, 20);
        assert_eq!(config.ocr.azure.timeout_secs, 30);
        assert_eq!(config.ocr.google.endpoint, "https://vision.googleapis.com");
    }

    #[test]
    fn poll_interval_as_duration() {
        let config = crate::config::AzureReadConfig::default();
        assert_eq!(config.poll_interval().as_millis(), 1_000);
        assert_eq!(config.timeout().as_secs(), 30);
    }
}

//! 애플리케이션 설정 구조체.
//!
//! 웹 게이트웨이 포트, OCR 제공자 선택, 벤더별 엔드포인트/자격증명과
//! 폴링 주기를 정의한다. JSON 설정 파일에서 로드하며, 핵심 로직은
//! 환경 변수를 직접 읽지 않는다 (`config_manager`가 명시적으로 적용).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 웹 게이트웨이 설정
    #[serde(default)]
    pub web: WebConfig,
    /// OCR 제공자 설정
    #[serde(default)]
    pub ocr: OcrConfig,
}

// ============================================================
// 웹 게이트웨이 설정
// ============================================================

/// 웹 게이트웨이 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// 웹 서버 포트 (기본: 9090)
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// 외부 접근 허용 여부 (false: 127.0.0.1 only)
    #[serde(default)]
    pub allow_external: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: default_web_port(),
            allow_external: false,
        }
    }
}

// ============================================================
// OCR 제공자 설정
// ============================================================

/// OCR 제공자 종류
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    /// Azure Computer Vision Read API — 제출 후 폴링 (기본값)
    #[default]
    AzureRead,
    /// Google Cloud Vision images:annotate — 단일 호출
    GoogleVision,
}

/// OCR 제공자 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrConfig {
    /// 사용할 제공자
    #[serde(default)]
    pub provider: ProviderKind,
    /// Azure Read 설정 (provider=azure-read일 때 사용)
    #[serde(default)]
    pub azure: AzureReadConfig,
    /// Google Vision 설정 (provider=google-vision일 때 사용)
    #[serde(default)]
    pub google: GoogleVisionConfig,
}

/// Azure Read API 설정
///
/// 엔드포인트/키 검증은 제공자 생성자에서 수행한다. 빈 값은 설정 파일이나
/// 환경 변수로 채워지기 전까지 허용된다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureReadConfig {
    /// 리소스 엔드포인트 (예: "https://my-resource.cognitiveservices.azure.com")
    #[serde(default)]
    pub endpoint: String,
    /// 구독 키 (`Ocp-Apim-Subscription-Key` 헤더)
    #[serde(default)]
    pub api_key: String,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_api_timeout_secs")]
    pub timeout_secs: u64,
    /// 폴링 주기 (밀리초)
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// 최대 폴링 횟수
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,
}

impl Default for AzureReadConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            timeout_secs: default_api_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            max_poll_attempts: default_max_poll_attempts(),
        }
    }
}

impl AzureReadConfig {
    /// 폴링 주기를 Duration으로 반환
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// 요청 타임아웃을 Duration으로 반환
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Google Cloud Vision 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleVisionConfig {
    /// API 베이스 URL
    #[serde(default = "default_google_endpoint")]
    pub endpoint: String,
    /// API 키 (`x-goog-api-key` 헤더)
    #[serde(default)]
    pub api_key: String,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_api_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GoogleVisionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_google_endpoint(),
            api_key: String::new(),
            timeout_secs: default_api_timeout_secs(),
        }
    }
}

impl GoogleVisionConfig {
    /// 요청 타임아웃을 Duration으로 반환
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ============================================================
// AppConfig impl
// ============================================================

impl AppConfig {
    /// 기본 설정값 반환
    pub fn default_config() -> Self {
        Self::default()
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_web_port() -> u16 {
    9090
}
fn default_api_timeout_secs() -> u64 {
    30
}
fn default_poll_interval_ms() -> u64 {
    1_000
}
fn default_max_poll_attempts() -> u32 {
    20
}
fn default_google_endpoint() -> String {
    "https://vision.googleapis.com".to_string()
}

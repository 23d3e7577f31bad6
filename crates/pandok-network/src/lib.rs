//! # pandok-network
//!
//! 클라우드 OCR 벤더 HTTP 어댑터.
//! Azure Computer Vision Read API(제출/폴링형)와 Google Cloud Vision
//! images:annotate(단일 호출형)를 `OcrProvider` 포트 구현으로 제공한다.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use pandok_network::azure_read_client::AzureReadProvider;
//! use pandok_network::google_vision_client::GoogleVisionProvider;
//! ```

pub mod azure_read_client;
pub mod google_vision_client;

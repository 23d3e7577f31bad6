//! PANDOK 도메인 모델.
//!
//! OCR 요청/결과와 장기 실행 작업 상태를 정의한다.
//! 모든 모델은 `serde` Serialize/Deserialize를 구현한다.

pub mod ocr;

//! # pandok-web
//!
//! 로컬 OCR 게이트웨이 서버.
//! Axum 기반 REST API — base64 이미지를 받아 설정된 OCR 제공자에 위임한다.
//!
//! ## 기능
//! - 문서 텍스트 추출 (POST /api/ocr)
//! - 헬스 체크 (GET /api/health)

pub mod error;
pub mod handlers;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use pandok_core::config::WebConfig;
use pandok_core::ports::ocr_provider::OcrProvider;

/// 웹 서버 애플리케이션 상태
#[derive(Clone)]
pub struct AppState {
    /// 활성 OCR 제공자
    pub provider: Arc<dyn OcrProvider>,
    /// 루트 취소 토큰 — 요청별 자식 토큰의 부모
    pub cancel: CancellationToken,
}

/// 전체 라우터 구성
///
/// CORS와 HTTP 트레이싱 레이어를 포함한 완성된 라우터를 반환한다.
/// 통합 테스트에서 포트 바인드 없이 재사용할 수 있도록 분리되어 있다.
pub fn app_router(state: AppState) -> Router {
    // 브라우저 확장 등 임의 오리진에서의 호출 허용
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", routes::api_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 로컬 OCR 게이트웨이 서버
pub struct WebServer {
    config: WebConfig,
    state: AppState,
}

impl WebServer {
    /// 새 웹 서버 생성
    pub fn new(
        provider: Arc<dyn OcrProvider>,
        config: WebConfig,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            config,
            state: AppState { provider, cancel },
        }
    }

    /// 서버 실행
    ///
    /// 설정된 포트에 바인드하고 종료 신호가 올 때까지 요청을 처리합니다.
    /// 바인드 실패는 포트 폴백 없이 그대로 반환합니다.
    ///
    /// # Arguments
    /// * `shutdown_rx` - 종료 신호 수신 채널
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>) -> Result<(), std::io::Error> {
        let host = if self.config.allow_external {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        };

        let addr: SocketAddr = format!("{}:{}", host, self.config.port)
            .parse()
            .map_err(|e| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("잘못된 주소 {}:{} — {}", host, self.config.port, e),
                )
            })?;

        let provider = self.state.provider.provider_name().to_string();
        let app = app_router(self.state);

        let listener = TcpListener::bind(addr).await?;
        info!(provider = %provider, "OCR 게이트웨이 서버 시작: http://{}", addr);

        // Graceful shutdown과 함께 서버 실행
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                loop {
                    if *shutdown_rx.borrow() {
                        info!("웹 서버 종료 신호 수신");
                        break;
                    }
                    if shutdown_rx.changed().await.is_err() {
                        break;
                    }
                }
            })
            .await?;

        info!("OCR 게이트웨이 서버 종료");
        Ok(())
    }

    /// 서버 URL 반환
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.config.port)
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::*;
    use async_trait::async_trait;
    use pandok_core::error::OcrError;
    use pandok_core::models::ocr::{OcrRequest, OcrResult};

    /// 고정 텍스트를 돌려주는 테스트용 제공자
    pub(crate) struct StubProvider {
        pub name: &'static str,
        pub text: &'static str,
    }

    #[async_trait]
    impl OcrProvider for StubProvider {
        async fn extract_text(
            &self,
            _request: &OcrRequest,
            cancel: &CancellationToken,
        ) -> Result<OcrResult, OcrError> {
            if cancel.is_cancelled() {
                return Err(OcrError::Cancelled);
            }
            Ok(OcrResult::succeeded(self.text.to_string()))
        }

        fn provider_name(&self) -> &str {
            self.name
        }
    }

    pub(crate) fn stub_state(text: &'static str) -> AppState {
        AppState {
            provider: Arc::new(StubProvider { name: "stub", text }),
            cancel: CancellationToken::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::StubProvider;

    #[test]
    fn default_config() {
        let config = WebConfig::default();
        assert_eq!(config.port, 9090);
        assert!(!config.allow_external);
    }

    #[test]
    fn web_server_url() {
        let server = WebServer::new(
            Arc::new(StubProvider {
                name: "stub",
                text: "",
            }),
            WebConfig::default(),
            CancellationToken::new(),
        );
        assert_eq!(server.url(), "http://localhost:9090");
    }

    #[test]
    fn child_token_follows_root_cancellation() {
        let root = CancellationToken::new();
        let child = root.child_token();
        assert!(!child.is_cancelled());
        root.cancel();
        assert!(child.is_cancelled());
    }
}

//! # pandok-app
//!
//! PANDOK 게이트웨이 바이너리 진입점.
//! 설정 로드, 제공자 와이어링, 라이프사이클 관리.

mod lifecycle;

use anyhow::{anyhow, Result};
use clap::Parser;
use pandok_core::config::{OcrConfig, ProviderKind};
use pandok_core::config_manager::ConfigManager;
use pandok_core::ports::ocr_provider::OcrProvider;
use pandok_network::azure_read_client::AzureReadProvider;
use pandok_network::google_vision_client::GoogleVisionProvider;
use pandok_web::WebServer;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::lifecycle::LifecycleManager;

/// PANDOK 클라우드 OCR 게이트웨이
///
/// base64 이미지를 받아 클라우드 비전 API로 문서 텍스트를 추출하는 로컬 게이트웨이
#[derive(Parser, Debug)]
#[command(name = "pandok")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 설정 파일 경로 (기본: 플랫폼별 설정 디렉토리)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 웹 서버 포트 (설정 파일 값보다 우선)
    #[arg(long, short = 'p')]
    port: Option<u16>,

    /// OCR 제공자 (azure-read | google-vision)
    #[arg(long)]
    provider: Option<String>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,
}

/// 크레이트별 로그 필터 문자열 구성
fn build_log_filter(level: &str) -> String {
    format!(
        "pandok_app={},pandok_core={},pandok_network={},pandok_web={}",
        level, level, level, level
    )
}

/// CLI 제공자 인자 해석
fn parse_provider(raw: &str) -> Result<ProviderKind> {
    match raw.trim() {
        "azure-read" => Ok(ProviderKind::AzureRead),
        "google-vision" => Ok(ProviderKind::GoogleVision),
        other => Err(anyhow!(
            "알 수 없는 제공자: {other} (azure-read | google-vision 중 선택)"
        )),
    }
}

/// 설정에 따라 OCR 제공자 어댑터 생성
fn build_provider(config: &OcrConfig) -> Result<Arc<dyn OcrProvider>> {
    let provider: Arc<dyn OcrProvider> = match config.provider {
        ProviderKind::AzureRead => Arc::new(AzureReadProvider::new(&config.azure)?),
        ProviderKind::GoogleVision => Arc::new(GoogleVisionProvider::new(&config.google)?),
    };
    Ok(provider)
}

/// 배너 출력
fn print_banner() {
    println!();
    println!("╔═══════════════════════════════════════════════════════╗");
    println!("║                                                       ║");
    println!("║  ██████╗  █████╗ ███╗   ██╗██████╗  ██████╗ ██╗  ██╗  ║");
    println!("║  ██╔══██╗██╔══██╗████╗  ██║██╔══██╗██╔═══██╗██║ ██╔╝  ║");
    println!("║  ██████╔╝███████║██╔██╗ ██║██║  ██║██║   ██║█████╔╝   ║");
    println!("║  ██╔═══╝ ██╔══██║██║╚██╗██║██║  ██║██║   ██║██╔═██╗   ║");
    println!("║  ██║     ██║  ██║██║ ╚████║██████╔╝╚██████╔╝██║  ██╗  ║");
    println!("║  ╚═╝     ╚═╝  ╚═╝╚═╝  ╚═══╝╚═════╝  ╚═════╝ ╚═╝  ╚═╝  ║");
    println!("║                                                       ║");
    println!("║           클라우드 OCR 게이트웨이                        ║");
    println!("║                                                       ║");
    println!("╚═══════════════════════════════════════════════════════╝");
    println!();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // tracing 초기화
    let log_filter = build_log_filter(&args.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    print_banner();

    info!("PANDOK 게이트웨이 시작");

    // 설정 로드 — 파일 → 환경 변수 → CLI 순으로 우선순위 적용
    let config_manager = match args.config {
        Some(ref path) => ConfigManager::with_path(path.clone())
            .map_err(|e| anyhow!("설정 파일 로드 실패 ({}): {}", path.display(), e))?,
        None => ConfigManager::new().map_err(|e| anyhow!("설정 초기화 실패: {}", e))?,
    };
    info!("설정 파일: {:?}", config_manager.config_path());

    config_manager.apply_env_overrides();

    let mut config = config_manager.get();
    if let Some(port) = args.port {
        config.web.port = port;
    }
    if let Some(ref raw) = args.provider {
        config.ocr.provider = parse_provider(raw)?;
    }

    // ── 어댑터 생성 (DI 와이어링) ──

    // 1. OCR 제공자
    let provider = build_provider(&config.ocr)?;
    info!("OCR 제공자: {}", provider.provider_name());

    // 2. 라이프사이클
    let lifecycle = Arc::new(LifecycleManager::new());

    // 3. 웹 게이트웨이 서버
    let web_server = WebServer::new(provider, config.web.clone(), lifecycle.cancel_token());
    let web_url = web_server.url();
    let web_shutdown_rx = lifecycle.subscribe();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = web_server.run(web_shutdown_rx).await {
            error!("웹 서버 오류: {e}");
        }
    });
    info!("OCR 게이트웨이: {web_url}");

    info!("PANDOK 실행 중 (Ctrl+C로 종료)");

    // OS 시그널 대기
    lifecycle.wait_for_signal().await;

    // 진행 중 요청 정리 대기
    if tokio::time::timeout(Duration::from_secs(5), server_handle)
        .await
        .is_err()
    {
        warn!("웹 서버 종료 대기 시간 초과");
    }

    info!("PANDOK 게이트웨이 종료");
    Ok(())
}

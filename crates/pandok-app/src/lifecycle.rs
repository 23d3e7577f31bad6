//! 라이프사이클 관리.
//!
//! 시작/종료, 시그널 핸들링, 진행 중 작업 취소 전파.

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// 라이프사이클 관리자
///
/// 종료 신호를 watch 채널로 브로드캐스트하고, 동시에 루트 취소 토큰을
/// 취소한다. 웹 서버는 watch 채널로 새 연결 수락을 멈추고, 진행 중인
/// OCR 폴링은 자식 토큰을 통해 대기 중에도 즉시 중단된다.
pub struct LifecycleManager {
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    cancel: CancellationToken,
}

impl LifecycleManager {
    /// 새 라이프사이클 관리자 생성
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            shutdown_tx: tx,
            shutdown_rx: rx,
            cancel: CancellationToken::new(),
        }
    }

    /// 종료 수신기 복제
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    /// 루트 취소 토큰 복제
    ///
    /// 요청 핸들러는 이 토큰의 자식 토큰을 만들어 사용한다.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// 종료 신호 발송
    pub fn shutdown(&self) {
        info!("종료 신호 발송");
        let _ = self.shutdown_tx.send(true);
        self.cancel.cancel();
    }

    /// OS 시그널 대기 (SIGINT, SIGTERM)
    pub async fn wait_for_signal(&self) {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigint = signal(SignalKind::interrupt()).expect("SIGINT 핸들러 등록 실패");
            let mut sigterm = signal(SignalKind::terminate()).expect("SIGTERM 핸들러 등록 실패");

            tokio::select! {
                _ = sigint.recv() => {
                    info!("SIGINT 수신");
                }
                _ = sigterm.recv() => {
                    info!("SIGTERM 수신");
                }
            }
        }

        #[cfg(not(unix))]
        {
            tokio::signal::ctrl_c()
                .await
                .expect("Ctrl+C 핸들러 등록 실패");
            info!("Ctrl+C 수신");
        }

        self.shutdown();
    }
}

impl Default for LifecycleManager {
    fn default() -> Self {
        Self::new()
    }
}

//! 설정 파일 관리.
//!
//! 플랫폼별 설정 디렉토리에 JSON 파일로 설정을 저장/로드한다.
//! 환경 변수 오버라이드는 앱 셸이 명시적으로 호출할 때만 적용되며
//! 파일로 저장되지 않는다 (자격증명이 디스크에 남지 않도록).

use crate::config::AppConfig;
use crate::error::OcrError;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

/// 설정 파일 이름
const CONFIG_FILE_NAME: &str = "config.json";

/// 앱 디렉토리 이름
const APP_DIR_NAME: &str = "pandok";

/// Azure 엔드포인트 환경 변수
pub const ENV_AZURE_ENDPOINT: &str = "AZURE_VISION_ENDPOINT";
/// Azure 구독 키 환경 변수
pub const ENV_AZURE_KEY: &str = "AZURE_VISION_KEY";
/// Google API 키 환경 변수
pub const ENV_GOOGLE_KEY: &str = "GOOGLE_VISION_KEY";
/// 웹 서버 포트 환경 변수
pub const ENV_PORT: &str = "PANDOK_PORT";

/// 설정 관리자
///
/// 설정 파일의 로드와 환경 변수 오버라이드를 관리한다.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// 현재 설정 (스레드 안전)
    config: Arc<RwLock<AppConfig>>,
    /// 설정 파일 경로
    config_path: PathBuf,
}

impl ConfigManager {
    /// 새 설정 관리자 생성 및 설정 로드
    ///
    /// 설정 파일이 없으면 기본 설정을 생성하고 저장한다.
    pub fn new() -> Result<Self, OcrError> {
        let config_path = Self::default_config_path()?;
        Self::with_path(config_path)
    }

    /// 지정된 경로로 설정 관리자 생성
    pub fn with_path(config_path: PathBuf) -> Result<Self, OcrError> {
        // 설정 디렉토리 생성
        if let Some(parent) = config_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    OcrError::Configuration(format!(
                        "설정 디렉토리 생성 실패: {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
                info!("설정 디렉토리 생성: {}", parent.display());
            }
        }

        // 설정 파일 로드 또는 기본값 생성
        let config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            let default_config = AppConfig::default_config();
            Self::save_to_file(&config_path, &default_config)?;
            info!("기본 설정 파일 생성: {}", config_path.display());
            default_config
        };

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_path,
        })
    }

    /// 현재 설정 반환 (복제본)
    pub fn get(&self) -> AppConfig {
        self.config.read().unwrap().clone()
    }

    /// 설정 파일 경로 반환
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// 환경 변수 오버라이드 적용 (메모리에만, 파일 미저장)
    ///
    /// 파일 설정보다 환경 변수가 우선한다. 값은 로그에 남기지 않는다.
    pub fn apply_env_overrides(&self) {
        let mut config = self.config.write().unwrap();

        if let Some(endpoint) = read_env(ENV_AZURE_ENDPOINT) {
            config.ocr.azure.endpoint = endpoint;
            debug!("환경 변수 오버라이드 적용: {}", ENV_AZURE_ENDPOINT);
        }
        if let Some(key) = read_env(ENV_AZURE_KEY) {
            config.ocr.azure.api_key = key;
            debug!("환경 변수 오버라이드 적용: {}", ENV_AZURE_KEY);
        }
        if let Some(key) = read_env(ENV_GOOGLE_KEY) {
            config.ocr.google.api_key = key;
            debug!("환경 변수 오버라이드 적용: {}", ENV_GOOGLE_KEY);
        }
        if let Some(port) = read_env(ENV_PORT) {
            match port.parse::<u16>() {
                Ok(port) => {
                    config.web.port = port;
                    debug!("환경 변수 오버라이드 적용: {}", ENV_PORT);
                }
                Err(_) => warn!("{} 값이 포트 번호가 아님, 무시: {}", ENV_PORT, port),
            }
        }
    }

    /// 플랫폼별 기본 설정 파일 경로
    fn default_config_path() -> Result<PathBuf, OcrError> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(CONFIG_FILE_NAME))
    }

    /// 플랫폼별 설정 디렉토리 경로
    pub fn config_dir() -> Result<PathBuf, OcrError> {
        #[cfg(target_os = "macos")]
        {
            // macOS: ~/Library/Application Support/pandok/
            let home = std::env::var("HOME").map_err(|_| {
                OcrError::Configuration("HOME 환경 변수를 찾을 수 없습니다".to_string())
            })?;
            Ok(PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join(APP_DIR_NAME))
        }

        #[cfg(target_os = "windows")]
        {
            // Windows: %APPDATA%\pandok\
            let appdata = std::env::var("APPDATA").map_err(|_| {
                OcrError::Configuration("APPDATA 환경 변수를 찾을 수 없습니다".to_string())
            })?;
            Ok(PathBuf::from(appdata).join(APP_DIR_NAME))
        }

        #[cfg(target_os = "linux")]
        {
            // Linux: ~/.config/pandok/
            let home = std::env::var("HOME").map_err(|_| {
                OcrError::Configuration("HOME 환경 변수를 찾을 수 없습니다".to_string())
            })?;
            Ok(PathBuf::from(home).join(".config").join(APP_DIR_NAME))
        }

        #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
        {
            // 기타 플랫폼: 현재 디렉토리
            warn!("지원되지 않는 플랫폼, 현재 디렉토리 사용");
            Ok(PathBuf::from(".").join(APP_DIR_NAME))
        }
    }

    /// 파일에서 설정 로드
    fn load_from_file(path: &PathBuf) -> Result<AppConfig, OcrError> {
        let content = fs::read_to_string(path).map_err(|e| {
            OcrError::Configuration(format!("설정 파일 읽기 실패: {}: {}", path.display(), e))
        })?;

        let config: AppConfig = serde_json::from_str(&content).map_err(|e| {
            OcrError::Configuration(format!("설정 파일 파싱 실패: {}: {}", path.display(), e))
        })?;

        debug!("설정 파일 로드 완료: {}", path.display());
        Ok(config)
    }

    /// 파일에 설정 저장
    fn save_to_file(path: &PathBuf, config: &AppConfig) -> Result<(), OcrError> {
        let content = serde_json::to_string_pretty(config)
            .map_err(|e| OcrError::Configuration(format!("설정 직렬화 실패: {}", e)))?;

        fs::write(path, content).map_err(|e| {
            OcrError::Configuration(format!("설정 파일 저장 실패: {}: {}", path.display(), e))
        })?;

        Ok(())
    }
}

/// 환경 변수 읽기 (빈 값은 미설정으로 취급)
fn read_env(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

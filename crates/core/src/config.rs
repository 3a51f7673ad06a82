//! 설정 관리: pkgscan.toml 파싱 및 런타임 설정
//!
//! [`PkgscanConfig`]는 모든 크레이트의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. 환경변수 (`PKGSCAN_SCAN_MAX_DEPTH=8` 형식)
//! 2. 설정 파일 (`pkgscan.toml`)
//! 3. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), pkgscan_core::error::PkgscanError> {
//! use pkgscan_core::config::PkgscanConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = PkgscanConfig::load("pkgscan.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = PkgscanConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, PkgscanError};

/// pkgscan 통합 설정
///
/// `pkgscan.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PkgscanConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 스캔 설정
    #[serde(default)]
    pub scan: ScanConfig,
}

impl PkgscanConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, PkgscanError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, PkgscanError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PkgscanError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                PkgscanError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, PkgscanError> {
        toml::from_str(toml_str).map_err(|e| {
            PkgscanError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `PKGSCAN_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        override_string(&mut self.general.log_level, "PKGSCAN_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "PKGSCAN_GENERAL_LOG_FORMAT");

        override_csv(&mut self.scan.root_dirs, "PKGSCAN_SCAN_ROOT_DIRS");
        override_csv(&mut self.scan.exclude_dirs, "PKGSCAN_SCAN_EXCLUDE_DIRS");
        override_usize(&mut self.scan.max_depth, "PKGSCAN_SCAN_MAX_DEPTH");
        override_usize(&mut self.scan.max_file_size, "PKGSCAN_SCAN_MAX_FILE_SIZE");
        override_usize(&mut self.scan.max_packages, "PKGSCAN_SCAN_MAX_PACKAGES");
        override_usize(
            &mut self.scan.max_concurrent_parsers,
            "PKGSCAN_SCAN_MAX_CONCURRENT_PARSERS",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), PkgscanError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.scan.root_dirs.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "scan.root_dirs".to_owned(),
                reason: "at least one root directory required".to_owned(),
            }
            .into());
        }

        if self.scan.max_concurrent_parsers == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scan.max_concurrent_parsers".to_owned(),
                reason: "must be greater than 0".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "json".to_owned(),
        }
    }
}

/// 스캔 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// 스캔 루트 디렉토리 목록
    pub root_dirs: Vec<String>,
    /// 탐색에서 제외할 디렉토리 이름
    pub exclude_dirs: Vec<String>,
    /// 최대 디렉토리 탐색 깊이
    pub max_depth: usize,
    /// 매니페스트 최대 크기 (바이트)
    pub max_file_size: usize,
    /// 파일 하나에서 허용하는 최대 패키지 수
    pub max_packages: usize,
    /// 동시에 실행되는 파서 태스크 수
    pub max_concurrent_parsers: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root_dirs: vec![".".to_owned()],
            exclude_dirs: vec![".git".to_owned()],
            max_depth: 16,
            max_file_size: 10 * 1024 * 1024, // 10 MB
            max_packages: 50_000,
            max_concurrent_parsers: 8,
        }
    }
}

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}

fn override_csv(target: &mut Vec<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();
    }
}

//! 스캐너 설정
//!
//! [`ScannerConfig`]는 core의 [`ScanConfig`](pkgscan_core::config::ScanConfig)를
//! 그대로 옮겨 오고 유효성 검증과 빌더를 제공합니다.
//!
//! # 사용 예시
//!
//! ```
//! use pkgscan_scanner::{ScannerConfig, ScannerConfigBuilder};
//!
//! let config = ScannerConfig::default();
//! config.validate().unwrap();
//!
//! let config = ScannerConfigBuilder::new()
//!     .max_depth(4)
//!     .max_concurrent_parsers(2)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.max_depth, 4);
//! ```

use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use pkgscan_core::config::ScanConfig;

use crate::error::ScannerError;

/// 설정 상한값 상수
const MAX_DEPTH_LIMIT: usize = 256;
const MAX_FILE_SIZE: usize = 100 * 1024 * 1024; // 100 MB
const MAX_PACKAGES_LIMIT: usize = 500_000;
const MAX_CONCURRENT_PARSERS: usize = 256;
const MAX_PATH_LEN: usize = 4096;

/// 디렉토리 스캐너 설정
///
/// # 필드
///
/// - **root_dirs**: 스캔 루트 디렉토리 목록
/// - **exclude_dirs**: 탐색하지 않을 디렉토리 이름 (`.git`, `node_modules` 등)
/// - **max_depth**: 루트 기준 최대 탐색 깊이 (루트의 직계 파일이 깊이 0)
/// - **max_file_size**: 매니페스트 최대 크기 (바이트)
/// - **max_packages**: 파일 하나에서 허용하는 최대 패키지 수
/// - **max_concurrent_parsers**: 동시에 실행되는 파서 태스크 수
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerConfig {
    pub root_dirs: Vec<String>,
    pub exclude_dirs: Vec<String>,
    pub max_depth: usize,
    pub max_file_size: usize,
    pub max_packages: usize,
    pub max_concurrent_parsers: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self::from_core(&ScanConfig::default())
    }
}

impl ScannerConfig {
    /// core의 `ScanConfig`에서 스캐너 설정을 생성합니다.
    pub fn from_core(core: &ScanConfig) -> Self {
        Self {
            root_dirs: core.root_dirs.clone(),
            exclude_dirs: core.exclude_dirs.clone(),
            max_depth: core.max_depth,
            max_file_size: core.max_file_size,
            max_packages: core.max_packages,
            max_concurrent_parsers: core.max_concurrent_parsers,
        }
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// # 검증 규칙
    ///
    /// - `max_depth`: 0-256
    /// - `max_file_size`: 1-104857600 (100MB)
    /// - `max_packages`: 1-500000
    /// - `max_concurrent_parsers`: 1-256
    /// - `root_dirs`: 하나 이상, 비어있지 않고 `..` 컴포넌트가 없어야 함
    /// - `exclude_dirs`: 빈 이름 불가
    pub fn validate(&self) -> Result<(), ScannerError> {
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(config_error(
                "max_depth",
                format!("must be 0-{MAX_DEPTH_LIMIT}"),
            ));
        }

        if self.max_file_size == 0 || self.max_file_size > MAX_FILE_SIZE {
            return Err(config_error(
                "max_file_size",
                format!("must be 1-{MAX_FILE_SIZE}"),
            ));
        }

        if self.max_packages == 0 || self.max_packages > MAX_PACKAGES_LIMIT {
            return Err(config_error(
                "max_packages",
                format!("must be 1-{MAX_PACKAGES_LIMIT}"),
            ));
        }

        if self.max_concurrent_parsers == 0 || self.max_concurrent_parsers > MAX_CONCURRENT_PARSERS
        {
            return Err(config_error(
                "max_concurrent_parsers",
                format!("must be 1-{MAX_CONCURRENT_PARSERS}"),
            ));
        }

        if self.root_dirs.is_empty() {
            return Err(config_error(
                "root_dirs",
                "at least one root directory required",
            ));
        }

        for root in &self.root_dirs {
            validate_root_dir(root)?;
        }

        if self.exclude_dirs.iter().any(|d| d.trim().is_empty()) {
            return Err(config_error(
                "exclude_dirs",
                "excluded directory name must not be empty",
            ));
        }

        Ok(())
    }

    /// 디렉토리 이름이 제외 목록에 있는지 확인합니다.
    pub fn is_excluded(&self, dir_name: &str) -> bool {
        self.exclude_dirs.iter().any(|d| d == dir_name)
    }
}

fn validate_root_dir(root: &str) -> Result<(), ScannerError> {
    if root.is_empty() {
        return Err(config_error(
            "root_dirs",
            "root directory path must not be empty",
        ));
    }

    if Path::new(root)
        .components()
        .any(|c| c == Component::ParentDir)
    {
        return Err(config_error(
            "root_dirs",
            format!("root directory '{root}' contains path traversal pattern '..'"),
        ));
    }

    if root.len() > MAX_PATH_LEN {
        return Err(config_error(
            "root_dirs",
            format!("root directory path '{root}' exceeds maximum length {MAX_PATH_LEN}"),
        ));
    }

    Ok(())
}

fn config_error(field: &str, reason: impl Into<String>) -> ScannerError {
    ScannerError::Config {
        field: field.to_owned(),
        reason: reason.into(),
    }
}

/// [`ScannerConfig`] 빌더
///
/// 빌드 시 유효성 검증을 수행합니다.
#[derive(Debug, Default)]
pub struct ScannerConfigBuilder {
    config: ScannerConfig,
}

impl ScannerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 스캔 루트 디렉토리 목록을 설정합니다.
    pub fn root_dirs(mut self, dirs: Vec<String>) -> Self {
        self.config.root_dirs = dirs;
        self
    }

    /// 제외 디렉토리 이름 목록을 설정합니다.
    pub fn exclude_dirs(mut self, dirs: Vec<String>) -> Self {
        self.config.exclude_dirs = dirs;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    pub fn max_file_size(mut self, size: usize) -> Self {
        self.config.max_file_size = size;
        self
    }

    pub fn max_packages(mut self, max: usize) -> Self {
        self.config.max_packages = max;
        self
    }

    pub fn max_concurrent_parsers(mut self, max: usize) -> Self {
        self.config.max_concurrent_parsers = max;
        self
    }

    /// 설정을 검증하고 빌드합니다.
    ///
    /// # Errors
    ///
    /// 유효성 검증 실패 시 `ScannerError::Config` 반환
    pub fn build(self) -> Result<ScannerConfig, ScannerError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

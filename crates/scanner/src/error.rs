//! 스캐너 에러 타입
//!
//! [`ScannerError`]는 카탈로거와 디렉토리 스캐너에서 발생할 수 있는 에러를 나타냅니다.
//! `From<ScannerError> for PkgscanError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 전파됩니다.
//!
//! # 에러 카테고리
//!
//! - **매니페스트 파싱**: `Parse`, `TooManyPackages`
//! - **설정**: `Config`
//! - **파일 I/O**: `Io`, `FileTooBig`
//! - **실행 제어**: `Task`, `Cancelled`

use pkgscan_core::error::{ConfigError, PkgscanError, ScanError};

/// 스캐너 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum ScannerError {
    /// 매니페스트 / lockfile 파싱 실패
    #[error("parse error: {path}: {reason}")]
    Parse {
        /// 파싱 대상 파일 경로
        path: String,
        /// 파싱 실패 사유
        reason: String,
    },

    /// 파일 하나에서 너무 많은 패키지가 발견됨
    #[error("too many packages: {path}: {count} (max: {max})")]
    TooManyPackages {
        path: String,
        count: usize,
        max: usize,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 파일 I/O 에러
    #[error("io error: {path}: {source}")]
    Io {
        /// 관련 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 파일 크기 초과
    #[error("file too large: {path}: {size} bytes (max: {max})")]
    FileTooBig {
        path: String,
        size: usize,
        max: usize,
    },

    /// 블로킹 / 파서 태스크 실패
    #[error("task error: {0}")]
    Task(String),

    /// 스캔 취소됨
    #[error("scan cancelled")]
    Cancelled,
}

impl From<ScannerError> for PkgscanError {
    fn from(err: ScannerError) -> Self {
        match err {
            ScannerError::Parse { path, reason } => {
                PkgscanError::Scan(ScanError::ParseFailed(format!("{path}: {reason}")))
            }
            ScannerError::TooManyPackages { path, count, max } => PkgscanError::Scan(
                ScanError::ParseFailed(format!("{path}: {count} packages (max: {max})")),
            ),
            ScannerError::Config { field, reason } => {
                PkgscanError::Config(ConfigError::InvalidValue { field, reason })
            }
            ScannerError::Io { source, .. } => PkgscanError::Io(source),
            ScannerError::FileTooBig { path, size, max } => PkgscanError::Scan(
                ScanError::Discovery(format!("file too large: {path}: {size} bytes (max: {max})")),
            ),
            ScannerError::Task(msg) => PkgscanError::Scan(ScanError::Discovery(msg)),
            ScannerError::Cancelled => PkgscanError::Scan(ScanError::Cancelled),
        }
    }
}

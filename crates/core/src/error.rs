//! 에러 타입: 도메인별 에러 정의

/// pkgscan 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum PkgscanError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 카탈로그 에러
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogErrorKind),

    /// 스캔 에러
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    /// 로깅 초기화 에러
    #[error("logging error: {0}")]
    Logging(String),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 카탈로그 에러
///
/// 카탈로그의 add/delete/조회는 실패하지 않으므로 입력 검증 실패만 존재합니다.
#[derive(Debug, thiserror::Error)]
pub enum CatalogErrorKind {
    /// CPE 문자열 형식 오류
    #[error("invalid cpe '{value}': {reason}")]
    InvalidCpe { value: String, reason: String },
}

/// 스캔 에러
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// 매니페스트 / lockfile 파싱 실패
    #[error("parse failed: {0}")]
    ParseFailed(String),

    /// 디렉토리 탐색 실패
    #[error("discovery failed: {0}")]
    Discovery(String),

    /// 스캔 취소됨
    #[error("scan cancelled")]
    Cancelled,
}

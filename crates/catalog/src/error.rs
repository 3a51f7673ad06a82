//! 카탈로그 에러 타입
//!
//! 카탈로그의 add / delete / 조회 연산은 실패하지 않습니다.
//! "이미 존재하는 패키지"는 병합으로, "존재하지 않는 id 삭제"는 no-op으로 처리됩니다.
//! 따라서 [`CatalogError`]는 입력 값 검증(CPE 형식) 실패만 나타냅니다.

use pkgscan_core::error::{CatalogErrorKind, PkgscanError};

/// 카탈로그 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// CPE 문자열 형식 오류
    #[error("invalid cpe '{value}': {reason}")]
    InvalidCpe {
        /// 입력 문자열
        value: String,
        /// 실패 사유
        reason: String,
    },
}

impl From<CatalogError> for PkgscanError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidCpe { value, reason } => {
                PkgscanError::Catalog(CatalogErrorKind::InvalidCpe { value, reason })
            }
        }
    }
}

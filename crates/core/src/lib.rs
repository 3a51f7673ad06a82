#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;

// --- 주요 타입 re-export ---

// 에러
pub use error::{CatalogErrorKind, ConfigError, PkgscanError, ScanError};

// 설정
pub use config::{GeneralConfig, PkgscanConfig, ScanConfig};

// 로깅
pub use logging::init_tracing;

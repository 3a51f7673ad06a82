//! 카탈로거 -- 매니페스트 / lockfile에서 패키지 레코드 추출
//!
//! [`Cataloger`] trait은 각 생태계 파서가 구현해야 하는 인터페이스입니다.
//! 카탈로거는 "무엇이 패키지인가"만 결정하며, 같은 패키지인지 판단하고 병합하는 일은
//! 카탈로그가 담당합니다.
//!
//! # 지원 형식
//!
//! - `build.gradle`, `build.gradle.kts` -- [`BuildGradleCataloger`]
//! - `gradle.lockfile` -- [`GradleLockfileCataloger`]
//! - `package-lock.json` (v2/v3) -- [`NpmLockCataloger`]
//!
//! # 확장
//!
//! 새로운 형식을 지원하려면 `Cataloger` trait을 구현하고
//! [`CatalogerRegistry::register`]로 등록합니다.

pub mod gradle;
pub mod gradle_lockfile;
pub mod npm;

use std::path::Path;
use std::sync::Arc;

use pkgscan_catalog::{Location, Package};

use crate::error::ScannerError;

pub use gradle::BuildGradleCataloger;
pub use gradle_lockfile::GradleLockfileCataloger;
pub use npm::NpmLockCataloger;

/// 카탈로거 trait
///
/// 한 종류의 매니페스트를 파싱하여 패키지 레코드 목록을 생성합니다.
pub trait Cataloger: Send + Sync {
    /// 카탈로거 이름 (`found_by`와 메트릭 레이블에 사용)
    fn name(&self) -> &'static str;

    /// 주어진 경로의 파일을 이 카탈로거가 처리할 수 있는지 확인합니다.
    ///
    /// 파일 이름 패턴으로 판별합니다.
    fn can_parse(&self, path: &Path) -> bool;

    /// 파일 내용을 파싱하여 패키지 레코드를 반환합니다.
    ///
    /// # Arguments
    ///
    /// - `content`: 파일 내용 (UTF-8 문자열)
    /// - `location`: 파일 위치 (모든 레코드의 증거로 첨부됨)
    fn parse(&self, content: &str, location: &Location) -> Result<Vec<Package>, ScannerError>;
}

/// 파일 이름을 문자열로 반환합니다.
pub(crate) fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

/// 양 끝의 큰따옴표 / 작은따옴표를 제거합니다.
pub(crate) fn trim_quotes(s: &str) -> &str {
    s.trim_matches(|c| c == '"' || c == '\'')
}

/// 카탈로거 레지스트리
///
/// 등록 순서대로 카탈로거를 보관합니다. 한 파일을 여러 카탈로거가 처리할 수 있으면
/// 모두 실행되며, 결과는 카탈로그에서 병합됩니다.
#[derive(Clone)]
pub struct CatalogerRegistry {
    catalogers: Vec<Arc<dyn Cataloger>>,
}

impl CatalogerRegistry {
    /// 빈 레지스트리를 생성합니다.
    pub fn empty() -> Self {
        Self {
            catalogers: Vec::new(),
        }
    }

    /// 기본 카탈로거(Gradle, Gradle lockfile, npm)가 등록된 레지스트리를 생성합니다.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(BuildGradleCataloger);
        registry.register(GradleLockfileCataloger);
        registry.register(NpmLockCataloger);
        registry
    }

    /// 카탈로거를 등록합니다.
    pub fn register(&mut self, cataloger: impl Cataloger + 'static) {
        self.catalogers.push(Arc::new(cataloger));
    }

    /// 경로를 처리할 수 있는 카탈로거 목록 (등록 순서)
    pub fn matching(&self, path: &Path) -> Vec<Arc<dyn Cataloger>> {
        self.catalogers
            .iter()
            .filter(|c| c.can_parse(path))
            .cloned()
            .collect()
    }

    /// 경로를 처리할 수 있는 카탈로거가 하나라도 있는지 확인합니다.
    pub fn can_parse(&self, path: &Path) -> bool {
        self.catalogers.iter().any(|c| c.can_parse(path))
    }

    /// 등록된 카탈로거 이름 목록
    pub fn names(&self) -> Vec<&'static str> {
        self.catalogers.iter().map(|c| c.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.catalogers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogers.is_empty()
    }
}

impl Default for CatalogerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CatalogerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogerRegistry")
            .field("catalogers", &self.names())
            .finish()
    }
}

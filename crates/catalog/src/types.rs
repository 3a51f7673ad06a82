//! 도메인 타입 -- 패키지 레코드와 식별 필드
//!
//! [`Package`]는 식별 필드(타입, 이름, 버전, 언어, 메타데이터)와
//! 증거 필드(위치, CPE)로 구성됩니다. id는 식별 필드로만 계산됩니다.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cpe::Cpe;
use crate::id::{PackageId, identity};
use crate::location::{Location, LocationSet};

/// 패키지 생태계 타입
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum PackageType {
    /// 알 수 없는 타입
    #[default]
    #[serde(rename = "UnknownPackage")]
    Unknown,
    /// Alpine (apk)
    #[serde(rename = "apk")]
    Apk,
    /// Debian (dpkg)
    #[serde(rename = "deb")]
    Deb,
    /// RPM
    #[serde(rename = "rpm")]
    Rpm,
    /// npm
    #[serde(rename = "npm")]
    Npm,
    /// Java 아카이브 (jar/war/ear)
    #[serde(rename = "java-archive")]
    Java,
    /// Gradle 빌드 스크립트 / lockfile
    #[serde(rename = "java-gradle")]
    JavaGradle,
    /// RubyGems
    #[serde(rename = "gem")]
    Gem,
    /// Python
    #[serde(rename = "python")]
    Python,
    /// Go 모듈
    #[serde(rename = "go-module")]
    GoModule,
    /// Rust crate
    #[serde(rename = "rust-crate")]
    Rust,
}

impl PackageType {
    /// 모든 타입 목록
    pub const ALL: [PackageType; 11] = [
        Self::Unknown,
        Self::Apk,
        Self::Deb,
        Self::Rpm,
        Self::Npm,
        Self::Java,
        Self::JavaGradle,
        Self::Gem,
        Self::Python,
        Self::GoModule,
        Self::Rust,
    ];

    /// 타입 이름 문자열을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "UnknownPackage",
            Self::Apk => "apk",
            Self::Deb => "deb",
            Self::Rpm => "rpm",
            Self::Npm => "npm",
            Self::Java => "java-archive",
            Self::JavaGradle => "java-gradle",
            Self::Gem => "gem",
            Self::Python => "python",
            Self::GoModule => "go-module",
            Self::Rust => "rust-crate",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 패키지 언어
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// 언어 정보 없음
    #[default]
    #[serde(rename = "")]
    Unknown,
    Java,
    JavaScript,
    Python,
    Ruby,
    Go,
    Rust,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "",
            Self::Java => "java",
            Self::JavaScript => "javascript",
            Self::Python => "python",
            Self::Ruby => "ruby",
            Self::Go => "go",
            Self::Rust => "rust",
        };
        f.write_str(name)
    }
}

/// Java 계열 메타데이터
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JavaMetadata {
    /// Maven group id
    pub group_id: String,
    /// Maven artifact id
    pub artifact_id: String,
}

/// npm 메타데이터
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NpmMetadata {
    /// tarball URL
    pub resolved: Option<String>,
    /// SRI 해시 (`sha512-...`)
    pub integrity: Option<String>,
}

/// 타입별 메타데이터
///
/// 식별 필드에 포함되므로 같은 이름/버전이라도 메타데이터가 다르면 다른 패키지입니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum Metadata {
    #[default]
    None,
    Java(JavaMetadata),
    Npm(NpmMetadata),
}

/// 소프트웨어 패키지 레코드
///
/// 카탈로거가 생성하여 [`Catalog::add`](crate::Catalog::add)로 전달합니다.
/// id가 명시적으로 지정되지 않았다면 카탈로그가 식별 필드로부터 계산합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<PackageId>,
    /// 패키지 이름
    pub name: String,
    /// 패키지 버전
    pub version: String,
    /// 생태계 타입
    #[serde(rename = "type")]
    pub package_type: PackageType,
    /// 언어
    pub language: Language,
    /// 타입별 메타데이터
    pub metadata: Metadata,
    /// 레코드를 생성한 카탈로거 이름
    pub found_by: String,
    /// 증거가 발견된 위치
    pub locations: LocationSet,
    /// CPE 후보 목록
    pub cpes: Vec<Cpe>,
}

impl Package {
    /// 이름, 버전, 타입으로 패키지를 생성합니다.
    pub fn new(name: impl Into<String>, version: impl Into<String>, package_type: PackageType) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            package_type,
            ..Self::default()
        }
    }

    /// 명시적인 id를 지정합니다.
    pub fn with_id(mut self, id: impl Into<PackageId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_found_by(mut self, found_by: impl Into<String>) -> Self {
        self.found_by = found_by.into();
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.add(location);
        self
    }

    pub fn with_locations(mut self, locations: impl IntoIterator<Item = Location>) -> Self {
        self.locations.extend(locations);
        self
    }

    pub fn with_cpe(mut self, cpe: Cpe) -> Self {
        self.cpes.push(cpe);
        self
    }

    /// 패키지 id를 반환합니다.
    ///
    /// 명시적으로 지정된 id가 있으면 그대로, 없으면 식별 필드로부터 계산합니다.
    pub fn id(&self) -> PackageId {
        self.id.clone().unwrap_or_else(|| identity(self))
    }

    /// 명시적으로 지정된 id를 반환합니다.
    pub fn assigned_id(&self) -> Option<&PackageId> {
        self.id.as_ref()
    }

    pub(crate) fn assign_id(&mut self, id: PackageId) {
        self.id = Some(id);
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} ({})", self.name, self.version, self.package_type)
    }
}

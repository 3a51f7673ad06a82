//! 패키지 식별 함수
//!
//! [`identity`]는 패키지의 식별 필드(타입, 이름, 버전, 언어, 메타데이터)만으로
//! 안정적인 [`PackageId`]를 계산하는 순수 함수입니다. 위치와 CPE는 무시합니다.
//!
//! 식별 필드의 정규 JSON 문자열(정렬된 키)을 이름 기반 UUID v5로 해싱하므로
//! 프로세스와 실행 횟수에 관계없이 같은 입력은 항상 같은 id를 만듭니다.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::types::{Metadata, Package};

/// 패키지 id 네임스페이스 (UUID v5)
const PACKAGE_ID_NAMESPACE: Uuid = Uuid::from_u128(0x8f3c_2a61_5d0e_4b7a_9c14_e2f0_6a9d_3b58);

/// 패키지 식별자
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(String);

impl PackageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PackageId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for PackageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for PackageId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// 식별 필드의 정규 JSON 표현을 만듭니다.
///
/// 객체 키는 정렬되어 출력되며, 메타데이터 변형이 추가되면 `match`가 갱신을 강제합니다.
fn canonical_form(package: &Package) -> Value {
    let mut fields = Map::new();
    fields.insert("type".to_owned(), package.package_type.as_str().into());
    fields.insert("name".to_owned(), package.name.as_str().into());
    fields.insert("version".to_owned(), package.version.as_str().into());
    fields.insert("language".to_owned(), package.language.to_string().into());
    fields.insert("metadata".to_owned(), metadata_value(&package.metadata));
    Value::Object(fields)
}

fn metadata_value(metadata: &Metadata) -> Value {
    let mut fields = Map::new();
    match metadata {
        Metadata::None => return Value::Null,
        Metadata::Java(java) => {
            fields.insert("kind".to_owned(), "java".into());
            fields.insert("group_id".to_owned(), java.group_id.as_str().into());
            fields.insert("artifact_id".to_owned(), java.artifact_id.as_str().into());
        }
        Metadata::Npm(npm) => {
            fields.insert("kind".to_owned(), "npm".into());
            fields.insert("resolved".to_owned(), npm.resolved.clone().into());
            fields.insert("integrity".to_owned(), npm.integrity.clone().into());
        }
    }
    Value::Object(fields)
}

/// 식별 필드로부터 패키지 id를 계산합니다.
///
/// 명시적으로 지정된 id, 위치, CPE, `found_by`는 결과에 영향을 주지 않습니다.
pub fn identity(package: &Package) -> PackageId {
    let canonical = canonical_form(package).to_string();
    PackageId(
        Uuid::new_v5(&PACKAGE_ID_NAMESPACE, canonical.as_bytes())
            .simple()
            .to_string(),
    )
}

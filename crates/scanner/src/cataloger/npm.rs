//! package-lock.json 카탈로거
//!
//! [`NpmLockCataloger`]는 npm의 package-lock.json (v2/v3) 파일을 파싱하여
//! 설치된 각 패키지를 카탈로그 레코드로 만듭니다.
//!
//! # package-lock.json v3 형식 예시
//!
//! ```json
//! {
//!   "name": "my-app",
//!   "lockfileVersion": 3,
//!   "packages": {
//!     "": { "name": "my-app", "version": "1.0.0" },
//!     "node_modules/lodash": { "version": "4.17.21", "resolved": "...", "integrity": "sha512-..." }
//!   }
//! }
//! ```
//!
//! 루트 항목(키가 빈 문자열)과 버전이 없는 항목(workspace 링크 등)은 건너뜁니다.
//! 항목은 키 순서로 정렬되어 반환됩니다.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use pkgscan_catalog::{Language, Location, Metadata, NpmMetadata, Package, PackageType};

use crate::cataloger::{Cataloger, file_name};
use crate::error::ScannerError;

const NAME: &str = "javascript-lock-cataloger";
const NODE_MODULES: &str = "node_modules/";

/// package-lock.json 카탈로거
pub struct NpmLockCataloger;

#[derive(Deserialize)]
struct NpmLockFile {
    #[serde(default)]
    packages: BTreeMap<String, NpmPackageEntry>,
}

#[derive(Deserialize)]
struct NpmPackageEntry {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    resolved: Option<String>,
    #[serde(default)]
    integrity: Option<String>,
}

impl Cataloger for NpmLockCataloger {
    fn name(&self) -> &'static str {
        NAME
    }

    fn can_parse(&self, path: &Path) -> bool {
        file_name(path).is_some_and(|name| name == "package-lock.json")
    }

    fn parse(&self, content: &str, location: &Location) -> Result<Vec<Package>, ScannerError> {
        let lock_file: NpmLockFile =
            serde_json::from_str(content).map_err(|e| ScannerError::Parse {
                path: location.real_path().to_owned(),
                reason: e.to_string(),
            })?;

        let packages = lock_file
            .packages
            .into_iter()
            .filter(|(key, _)| !key.is_empty())
            .filter_map(|(key, entry)| {
                let version = entry.version?;
                Some(
                    Package::new(extract_package_name(&key), version, PackageType::Npm)
                        .with_language(Language::JavaScript)
                        .with_metadata(Metadata::Npm(NpmMetadata {
                            resolved: entry.resolved,
                            integrity: entry.integrity,
                        }))
                        .with_found_by(NAME)
                        .with_location(location.clone()),
                )
            })
            .collect();

        Ok(packages)
    }
}

/// "node_modules/@scope/name" 또는 "node_modules/name" 에서 패키지명 추출
///
/// 중첩된 경로는 마지막 `node_modules/` 이후를 사용합니다.
fn extract_package_name(key: &str) -> &str {
    match key.rfind(NODE_MODULES) {
        Some(pos) => &key[pos + NODE_MODULES.len()..],
        None => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PACKAGE_LOCK: &str = r#"{
  "name": "my-app",
  "version": "1.0.0",
  "lockfileVersion": 3,
  "packages": {
    "": {
      "name": "my-app",
      "version": "1.0.0",
      "dependencies": {
        "lodash": "^4.17.21"
      }
    },
    "node_modules/lodash": {
      "version": "4.17.21",
      "resolved": "https://registry.npmjs.org/lodash/-/lodash-4.17.21.tgz",
      "integrity": "sha512-v2kDE..."
    },
    "node_modules/express": {
      "version": "4.18.2",
      "resolved": "https://registry.npmjs.org/express/-/express-4.18.2.tgz",
      "integrity": "sha512-abc...",
      "dependencies": {
        "accepts": "~1.3.8"
      }
    },
    "packages/local": {
      "link": true
    }
  }
}"#;

    fn parse(content: &str) -> Result<Vec<Package>, ScannerError> {
        NpmLockCataloger.parse(content, &Location::new("/app/package-lock.json"))
    }

    #[test]
    fn can_parse_package_lock_json() {
        let cataloger = NpmLockCataloger;
        assert!(cataloger.can_parse(Path::new("package-lock.json")));
        assert!(cataloger.can_parse(Path::new("/project/package-lock.json")));
        assert!(!cataloger.can_parse(Path::new("Cargo.lock")));
        assert!(!cataloger.can_parse(Path::new("package.json")));
    }

    #[test]
    fn parse_sample_package_lock() {
        let packages = parse(SAMPLE_PACKAGE_LOCK).unwrap();

        // root entry and versionless link are skipped, keys sorted
        let names: Vec<&str> = packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["express", "lodash"]);

        let lodash = &packages[1];
        assert_eq!(lodash.version, "4.17.21");
        assert_eq!(lodash.package_type, PackageType::Npm);
        assert_eq!(lodash.language, Language::JavaScript);
        assert_eq!(lodash.found_by, NAME);
        assert_eq!(
            lodash.metadata,
            Metadata::Npm(NpmMetadata {
                resolved: Some(
                    "https://registry.npmjs.org/lodash/-/lodash-4.17.21.tgz".to_owned()
                ),
                integrity: Some("sha512-v2kDE...".to_owned()),
            })
        );
    }

    #[test]
    fn parse_empty_packages() {
        assert!(parse(r#"{ "packages": {} }"#).unwrap().is_empty());
        assert!(parse(r#"{ "lockfileVersion": 1 }"#).unwrap().is_empty());
    }

    #[test]
    fn parse_invalid_json_returns_error() {
        let err = parse("not json!").unwrap_err();
        assert!(matches!(err, ScannerError::Parse { .. }));
        assert!(err.to_string().contains("/app/package-lock.json"));
    }

    #[test]
    fn extract_package_name_simple() {
        assert_eq!(extract_package_name("node_modules/lodash"), "lodash");
    }

    #[test]
    fn extract_package_name_scoped() {
        assert_eq!(
            extract_package_name("node_modules/@types/node"),
            "@types/node"
        );
    }

    #[test]
    fn extract_package_name_nested() {
        assert_eq!(
            extract_package_name("node_modules/express/node_modules/debug"),
            "debug"
        );
    }
}

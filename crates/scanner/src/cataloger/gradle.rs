//! build.gradle 카탈로거
//!
//! Groovy / Kotlin DSL 빌드 스크립트를 줄 단위로 스캔합니다. 스크립트를 평가하지 않으므로
//! 한 줄에 하나씩 선언된 좌표만 인식합니다.
//!
//! ```text
//! plugins {
//!     id("org.springframework.boot") version "2.7.0"
//! }
//!
//! dependencies {
//!     implementation("joda-time:joda-time:2.2")
//!     implementation("org.springframework.boot:spring-boot-starter-web")
//!     testImplementation 'junit:junit:4.12'
//! }
//! ```
//!
//! - `plugins { ... }` 안에서 `id("x") version "y"` 형식(필드 3개 이상)은 플러그인 버전이 됩니다.
//! - `dependencies { ... }` 안에서 `group:name:version` 좌표는 그대로,
//!   `group:name` 좌표는 group과 같은 id를 가진 플러그인의 버전을 사용합니다.
//! - 단독 `}` 줄이 현재 섹션을 닫습니다.

use std::path::Path;

use pkgscan_catalog::{JavaMetadata, Language, Location, Metadata, Package, PackageType};

use crate::cataloger::{Cataloger, file_name, trim_quotes};
use crate::error::ScannerError;

const NAME: &str = "java-gradle-build-cataloger";

/// build.gradle 카탈로거
pub struct BuildGradleCataloger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Dependencies,
    Plugins,
}

#[derive(Debug, PartialEq, Eq)]
struct Plugin<'a> {
    id: &'a str,
    version: &'a str,
}

#[derive(Debug, PartialEq, Eq)]
struct Dependency<'a> {
    group: &'a str,
    name: &'a str,
    version: &'a str,
}

impl Cataloger for BuildGradleCataloger {
    fn name(&self) -> &'static str {
        NAME
    }

    fn can_parse(&self, path: &Path) -> bool {
        file_name(path).is_some_and(|name| name.contains("build.gradle"))
    }

    fn parse(&self, content: &str, location: &Location) -> Result<Vec<Package>, ScannerError> {
        let mut section = Section::None;
        let mut plugins = Vec::new();
        let mut dependencies = Vec::new();

        for raw in content.lines() {
            let line = raw.trim();

            if line.starts_with("dependencies {") {
                section = Section::Dependencies;
                continue;
            }
            if line.starts_with("plugins {") {
                section = Section::Plugins;
                continue;
            }
            if line == "}" {
                section = Section::None;
                continue;
            }

            match section {
                Section::Plugins => plugins.extend(parse_plugin(line)),
                Section::Dependencies => dependencies.extend(parse_dependency(line, &plugins)),
                Section::None => {}
            }
        }

        let packages = dependencies
            .into_iter()
            .map(|dep| {
                Package::new(dep.name, dep.version, PackageType::JavaGradle)
                    .with_language(Language::Java)
                    .with_metadata(Metadata::Java(JavaMetadata {
                        group_id: dep.group.to_owned(),
                        artifact_id: dep.name.to_owned(),
                    }))
                    .with_found_by(NAME)
                    .with_location(location.clone())
            })
            .collect();

        Ok(packages)
    }
}

/// `id("x") version "y"` 줄에서 플러그인을 추출합니다.
fn parse_plugin(line: &str) -> Option<Plugin<'_>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return None;
    }

    let head = fields[0];
    let start = head.find('(')? + 1;
    let end = head[start..].find(')')? + start;

    Some(Plugin {
        id: trim_quotes(&head[start..end]),
        version: trim_quotes(fields[2]),
    })
}

/// 의존성 선언 줄에서 좌표를 추출합니다.
///
/// 좌표는 첫 `(` 또는 공백 다음부터 그 뒤의 첫 `)` 또는 공백까지입니다.
fn parse_dependency<'a>(line: &'a str, plugins: &[Plugin<'a>]) -> Option<Dependency<'a>> {
    let start = line.find(['(', ' '])? + 1;
    let rest = &line[start..];
    let end = rest.find([')', ' ']).unwrap_or(rest.len());
    let coordinate = trim_quotes(&rest[..end]);
    if coordinate.contains(['(', '"', '\'']) {
        return None;
    }

    let parts: Vec<&str> = coordinate.split(':').collect();
    let dependency = match *parts.as_slice() {
        [group, name] => Dependency {
            group,
            name,
            version: search_plugins(group, plugins),
        },
        [group, name, version] => Dependency {
            group,
            name,
            version,
        },
        _ => return None,
    };

    (!dependency.name.is_empty()).then_some(dependency)
}

fn search_plugins<'a>(group: &str, plugins: &[Plugin<'a>]) -> &'a str {
    plugins
        .iter()
        .find(|p| p.id == group)
        .map(|p| p.version)
        .unwrap_or_default()
}

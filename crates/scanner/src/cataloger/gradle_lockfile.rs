//! gradle.lockfile 카탈로거
//!
//! Gradle 의존성 잠금 파일은 한 줄에 하나의 좌표를 기록합니다.
//!
//! ```text
//! # This is a Gradle generated file for dependency locking.
//! joda-time:joda-time:2.2=compileClasspath,runtimeClasspath
//! junit:junit:4.12=testCompileClasspath
//! empty=annotationProcessor
//! ```
//!
//! `group:name:version=configurations` 형식의 줄만 패키지가 되며,
//! 나머지 줄(주석, `empty=...`)은 무시됩니다.

use std::path::Path;

use pkgscan_catalog::{JavaMetadata, Language, Location, Metadata, Package, PackageType};

use crate::cataloger::{Cataloger, file_name, trim_quotes};
use crate::error::ScannerError;

const NAME: &str = "java-gradle-lockfile-cataloger";

/// gradle.lockfile 카탈로거
pub struct GradleLockfileCataloger;

impl Cataloger for GradleLockfileCataloger {
    fn name(&self) -> &'static str {
        NAME
    }

    fn can_parse(&self, path: &Path) -> bool {
        file_name(path).is_some_and(|name| name.contains("gradle.lockfile"))
    }

    fn parse(&self, content: &str, location: &Location) -> Result<Vec<Package>, ScannerError> {
        let packages = content
            .lines()
            .filter_map(parse_line)
            .map(|(group, name, version)| {
                Package::new(name, version, PackageType::JavaGradle)
                    .with_language(Language::Java)
                    .with_metadata(Metadata::Java(JavaMetadata {
                        group_id: group.to_owned(),
                        artifact_id: name.to_owned(),
                    }))
                    .with_found_by(NAME)
                    .with_location(location.clone())
            })
            .collect();

        Ok(packages)
    }
}

/// `group:name:version=configs` 한 줄을 (group, name, version)으로 분해합니다.
fn parse_line(line: &str) -> Option<(&str, &str, &str)> {
    let line = trim_quotes(line.trim());
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut parts = line.split(':');
    let (group, name, rest) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || name.is_empty() {
        return None;
    }

    let version = rest.split('=').next().unwrap_or_default();
    Some((group, name, version))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCKFILE: &str = r#"# This is a Gradle generated file for dependency locking.
# Manual edits can break the build and are not advised.
# This file is expected to be part of source control.
joda-time:joda-time:2.2=compileClasspath,runtimeClasspath
junit:junit:4.12=testCompileClasspath,testRuntimeClasspath
org.hamcrest:hamcrest-core:1.3=testCompileClasspath,testRuntimeClasspath
empty=annotationProcessor
"#;

    fn parse(content: &str) -> Vec<Package> {
        GradleLockfileCataloger
            .parse(content, &Location::new("/app/gradle.lockfile"))
            .unwrap()
    }

    #[test]
    fn parses_lockfile_entries() {
        let packages = parse(LOCKFILE);
        let coords: Vec<(String, String)> = packages
            .iter()
            .map(|p| (p.name.clone(), p.version.clone()))
            .collect();
        assert_eq!(
            coords,
            vec![
                ("joda-time".to_owned(), "2.2".to_owned()),
                ("junit".to_owned(), "4.12".to_owned()),
                ("hamcrest-core".to_owned(), "1.3".to_owned()),
            ]
        );
    }

    #[test]
    fn packages_carry_java_fields_and_location() {
        let packages = parse(LOCKFILE);
        let hamcrest = &packages[2];
        assert_eq!(hamcrest.package_type, PackageType::JavaGradle);
        assert_eq!(hamcrest.language, Language::Java);
        assert_eq!(hamcrest.found_by, NAME);
        assert_eq!(
            hamcrest.metadata,
            Metadata::Java(JavaMetadata {
                group_id: "org.hamcrest".to_owned(),
                artifact_id: "hamcrest-core".to_owned(),
            })
        );
        assert!(hamcrest.locations.contains(&Location::new("/app/gradle.lockfile")));
    }

    #[test]
    fn line_without_configurations_keeps_version() {
        assert_eq!(parse_line("a:b:1.0"), Some(("a", "b", "1.0")));
    }

    #[test]
    fn quoted_line_is_trimmed() {
        assert_eq!(parse_line("  \"a:b:1.0=x\"  "), Some(("a", "b", "1.0")));
    }

    #[test]
    fn ignores_lines_with_wrong_part_count() {
        assert_eq!(parse_line("a:b"), None);
        assert_eq!(parse_line("a:b:c:d"), None);
        assert_eq!(parse_line("empty=annotationProcessor"), None);
        assert_eq!(parse_line(""), None);
    }

    #[test]
    fn empty_lockfile_yields_nothing() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn matches_lockfile_names() {
        let cataloger = GradleLockfileCataloger;
        assert!(cataloger.can_parse(Path::new("/app/gradle.lockfile")));
        assert!(cataloger.can_parse(Path::new("/app/buildscript-gradle.lockfile")));
        assert!(!cataloger.can_parse(Path::new("/app/build.gradle")));
    }
}

//! 디렉토리 스캐너 -- 매니페스트 탐색과 병렬 카탈로깅
//!
//! [`CatalogScanner`]는 루트 디렉토리를 재귀적으로 탐색하여 등록된 카탈로거가 처리할 수 있는
//! 파일을 찾고, 파일마다 별도의 tokio 태스크에서 파싱한 뒤 결과를 공유 [`Catalog`]에 추가합니다.
//!
//! # 내부 아키텍처
//!
//! ```text
//! root --> discover_manifests (spawn_blocking)
//!              |
//!              v
//!        [path, path, ...] --> task per file (Semaphore: max_concurrent_parsers)
//!                                   |
//!                              Cataloger::parse
//!                                   |
//!                              Catalog::add  (Arc<Catalog>, 공유)
//! ```
//!
//! 파일 하나의 파싱 실패는 경고 로그만 남기고 건너뜁니다. 스캔 자체가 실패하는 경우는
//! 루트 디렉토리 I/O 실패와 취소뿐입니다.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use metrics::{counter, histogram};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use pkgscan_catalog::{Catalog, Location};
use pkgscan_core::metrics::{
    LABEL_CATALOGER, SCANNER_FILES_PARSED_TOTAL, SCANNER_PARSE_ERRORS_TOTAL,
    SCANNER_SCAN_DURATION_SECONDS,
};

use crate::cataloger::{Cataloger, CatalogerRegistry};
use crate::config::ScannerConfig;
use crate::error::ScannerError;

/// 스캔 1회의 결과 요약
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    /// 스캔 id (UUID v4)
    pub scan_id: String,
    /// 스캔한 루트 디렉토리
    pub root: String,
    /// 카탈로거가 처리할 수 있는 파일 수
    pub files_discovered: usize,
    /// 성공적으로 파싱된 (파일, 카탈로거) 쌍의 수
    pub files_parsed: usize,
    /// 읽기 / 파싱에 실패하여 건너뛴 (파일, 카탈로거) 쌍의 수
    pub files_failed: usize,
    /// 카탈로거가 보고한 레코드 수 (병합 전)
    pub packages_reported: usize,
    /// 스캔 종료 시점의 카탈로그 패키지 수
    pub catalog_size: usize,
    /// 소요 시간
    pub duration: Duration,
}

/// 파일 하나를 처리한 결과
#[derive(Debug, Default)]
struct FileReport {
    parsed: usize,
    failed: usize,
    packages: usize,
    cancelled: bool,
}

impl FileReport {
    fn cancelled() -> Self {
        Self {
            cancelled: true,
            ..Self::default()
        }
    }
}

/// 디렉토리 스캐너
///
/// 같은 [`Catalog`]를 여러 스캔이 공유할 수 있으며, 스캔이 진행 중일 때도
/// 카탈로그 조회는 일관된 결과를 반환합니다.
pub struct CatalogScanner {
    config: ScannerConfig,
    registry: Arc<CatalogerRegistry>,
    catalog: Arc<Catalog>,
    cancel: CancellationToken,
}

impl CatalogScanner {
    /// 스캐너 설정
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// 결과가 추가되는 카탈로그
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    /// 등록된 카탈로거
    pub fn registry(&self) -> &CatalogerRegistry {
        &self.registry
    }

    /// 진행 중인 스캔을 취소하는 토큰
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// 진행 중이거나 이후의 스캔을 취소합니다.
    ///
    /// 이미 카탈로그에 추가된 패키지는 그대로 남습니다.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// 설정된 모든 루트 디렉토리를 순서대로 스캔합니다.
    pub async fn scan_all(&self) -> Result<Vec<ScanSummary>, ScannerError> {
        let mut summaries = Vec::with_capacity(self.config.root_dirs.len());
        for root in &self.config.root_dirs {
            summaries.push(self.scan(root).await?);
        }
        Ok(summaries)
    }

    /// 루트 디렉토리 하나를 스캔합니다.
    ///
    /// # Errors
    ///
    /// - 루트 디렉토리를 읽을 수 없으면 `ScannerError::Io`
    /// - 스캔 도중 취소되면 `ScannerError::Cancelled`
    pub async fn scan(&self, root: impl AsRef<Path>) -> Result<ScanSummary, ScannerError> {
        let root = root.as_ref().to_path_buf();
        let started = Instant::now();
        let scan_id = uuid::Uuid::new_v4().to_string();

        if self.cancel.is_cancelled() {
            return Err(ScannerError::Cancelled);
        }

        info!(scan_id = %scan_id, root = %root.display(), "scan started");

        // 매니페스트 탐색 (blocking I/O)
        let manifests = {
            let root = root.clone();
            let registry = Arc::clone(&self.registry);
            let config = self.config.clone();
            tokio::task::spawn_blocking(move || discover_manifests(&root, &registry, &config))
                .await
                .map_err(|e| ScannerError::Task(format!("spawn_blocking failed: {e}")))?
        }?;

        let files_discovered = manifests.len();
        debug!(scan_id = %scan_id, files = files_discovered, "manifests discovered");

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_parsers));
        let mut tasks = JoinSet::new();

        for path in manifests {
            let catalogers = self.registry.matching(&path);
            let location = Location::new(display_path(&root, &path));
            let semaphore = Arc::clone(&semaphore);
            let catalog = Arc::clone(&self.catalog);
            let cancel = self.cancel.clone();
            let max_packages = self.config.max_packages;

            tasks.spawn(async move {
                let _permit = tokio::select! {
                    _ = cancel.cancelled() => return FileReport::cancelled(),
                    permit = semaphore.acquire_owned() => match permit {
                        Ok(permit) => permit,
                        Err(_) => return FileReport::cancelled(),
                    },
                };
                if cancel.is_cancelled() {
                    return FileReport::cancelled();
                }

                catalog_file(&path, &location, &catalogers, &catalog, max_packages).await
            });
        }

        let mut files_parsed = 0;
        let mut files_failed = 0;
        let mut packages_reported = 0;
        let mut cancelled = false;

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(report) => {
                    files_parsed += report.parsed;
                    files_failed += report.failed;
                    packages_reported += report.packages;
                    cancelled |= report.cancelled;
                }
                Err(e) => {
                    warn!(scan_id = %scan_id, error = %e, "parser task failed");
                    files_failed += 1;
                }
            }
        }

        let duration = started.elapsed();
        histogram!(SCANNER_SCAN_DURATION_SECONDS).record(duration.as_secs_f64());

        if cancelled || self.cancel.is_cancelled() {
            warn!(
                scan_id = %scan_id,
                root = %root.display(),
                files_parsed,
                "scan cancelled"
            );
            return Err(ScannerError::Cancelled);
        }

        let summary = ScanSummary {
            scan_id,
            root: root.display().to_string(),
            files_discovered,
            files_parsed,
            files_failed,
            packages_reported,
            catalog_size: self.catalog.package_count(),
            duration,
        };

        info!(
            scan_id = %summary.scan_id,
            root = %summary.root,
            files = summary.files_discovered,
            parsed = summary.files_parsed,
            failed = summary.files_failed,
            packages = summary.packages_reported,
            catalog_size = summary.catalog_size,
            duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            "scan completed"
        );

        Ok(summary)
    }
}

/// 파일을 읽고 매칭된 모든 카탈로거로 파싱한 뒤 카탈로그에 추가합니다.
async fn catalog_file(
    path: &Path,
    location: &Location,
    catalogers: &[Arc<dyn Cataloger>],
    catalog: &Catalog,
    max_packages: usize,
) -> FileReport {
    let mut report = FileReport::default();

    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read manifest, skipping");
            report.failed = catalogers.len();
            return report;
        }
    };

    for cataloger in catalogers {
        let name = cataloger.name();
        match cataloger.parse(&content, location) {
            Ok(packages) if packages.len() > max_packages => {
                let err = ScannerError::TooManyPackages {
                    path: location.real_path().to_owned(),
                    count: packages.len(),
                    max: max_packages,
                };
                warn!(cataloger = name, error = %err, "skipping manifest");
                counter!(SCANNER_PARSE_ERRORS_TOTAL, LABEL_CATALOGER => name).increment(1);
                report.failed += 1;
            }
            Ok(packages) => {
                counter!(SCANNER_FILES_PARSED_TOTAL, LABEL_CATALOGER => name).increment(1);
                debug!(
                    cataloger = name,
                    path = %location,
                    packages = packages.len(),
                    "manifest parsed"
                );
                report.parsed += 1;
                report.packages += packages.len();
                for mut package in packages {
                    if package.found_by.is_empty() {
                        package.found_by = name.to_owned();
                    }
                    catalog.add(package);
                }
            }
            Err(e) => {
                warn!(cataloger = name, path = %location, error = %e, "failed to parse manifest, skipping");
                counter!(SCANNER_PARSE_ERRORS_TOTAL, LABEL_CATALOGER => name).increment(1);
                report.failed += 1;
            }
        }
    }

    report
}

/// 루트 기준 상대 경로를 `/`로 시작하는 카탈로그 경로로 변환합니다.
fn display_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let joined = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    format!("/{}", joined.trim_start_matches('/'))
}

/// 디렉토리를 재귀적으로 탐색하여 카탈로거가 처리할 수 있는 파일을 찾습니다 (동기 I/O).
///
/// `tokio::task::spawn_blocking` 내에서 호출되어야 합니다. 심볼릭 링크는 따라가지 않으며,
/// 결과는 경로 순으로 정렬된 깊이 우선 순서입니다.
fn discover_manifests(
    root: &Path,
    registry: &CatalogerRegistry,
    config: &ScannerConfig,
) -> Result<Vec<PathBuf>, ScannerError> {
    let metadata = std::fs::metadata(root).map_err(|e| ScannerError::Io {
        path: root.display().to_string(),
        source: e,
    })?;
    if !metadata.is_dir() {
        return Err(ScannerError::Io {
            path: root.display().to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
        });
    }

    let mut results = Vec::new();
    let mut stack = vec![(root.to_path_buf(), 0usize)];

    while let Some((dir, depth)) = stack.pop() {
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if dir == root => {
                return Err(ScannerError::Io {
                    path: dir.display().to_string(),
                    source: e,
                });
            }
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "failed to read directory, skipping");
                continue;
            }
        };

        let mut entries: Vec<_> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "failed to read directory entry");
                    None
                }
            })
            .collect();
        entries.sort_by_key(|entry| entry.path());

        let mut subdirs = Vec::new();
        for entry in entries {
            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(ft) => ft,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to read file type");
                    continue;
                }
            };

            if file_type.is_symlink() {
                debug!(path = %path.display(), "symlink skipped");
                continue;
            }

            if file_type.is_dir() {
                let excluded = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|name| config.is_excluded(name));
                if excluded {
                    debug!(dir = %path.display(), "excluded directory skipped");
                } else if depth < config.max_depth {
                    subdirs.push((path, depth + 1));
                }
                continue;
            }

            if !file_type.is_file() || !registry.can_parse(&path) {
                continue;
            }

            let size = match entry.metadata() {
                Ok(m) => usize::try_from(m.len()).unwrap_or(usize::MAX),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to read file metadata");
                    continue;
                }
            };
            if size > config.max_file_size {
                let err = ScannerError::FileTooBig {
                    path: path.display().to_string(),
                    size,
                    max: config.max_file_size,
                };
                warn!(error = %err, "manifest too large, skipping");
                continue;
            }

            results.push(path);
        }

        // 정렬 순서대로 방문하도록 역순으로 push
        stack.extend(subdirs.into_iter().rev());
    }

    Ok(results)
}

/// [`CatalogScanner`] 빌더
#[derive(Default)]
pub struct CatalogScannerBuilder {
    config: ScannerConfig,
    registry: Option<CatalogerRegistry>,
    catalog: Option<Arc<Catalog>>,
    cancel: Option<CancellationToken>,
}

impl CatalogScannerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 스캐너 설정을 지정합니다.
    pub fn config(mut self, config: ScannerConfig) -> Self {
        self.config = config;
        self
    }

    /// 카탈로거 레지스트리를 지정합니다 (기본: [`CatalogerRegistry::new`]).
    pub fn registry(mut self, registry: CatalogerRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// 결과를 추가할 카탈로그를 지정합니다 (기본: 새 빈 카탈로그).
    pub fn catalog(mut self, catalog: Arc<Catalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// 외부 취소 토큰을 지정합니다.
    pub fn cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// 설정을 검증하고 스캐너를 생성합니다.
    ///
    /// # Errors
    ///
    /// 설정 검증 실패 시 `ScannerError::Config` 반환
    pub fn build(self) -> Result<CatalogScanner, ScannerError> {
        self.config.validate()?;

        Ok(CatalogScanner {
            config: self.config,
            registry: Arc::new(self.registry.unwrap_or_default()),
            catalog: self.catalog.unwrap_or_default(),
            cancel: self.cancel.unwrap_or_else(CancellationToken::new),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn builder_creates_scanner_with_defaults() {
        let scanner = CatalogScannerBuilder::new().build().unwrap();
        assert_eq!(scanner.registry().len(), 3);
        assert!(scanner.catalog().is_empty());
    }

    #[test]
    fn builder_rejects_invalid_config() {
        let config = ScannerConfig {
            max_concurrent_parsers: 0,
            ..Default::default()
        };
        let result = CatalogScannerBuilder::new().config(config).build();
        assert!(result.is_err());
    }

    #[test]
    fn display_path_is_root_relative() {
        let root = Path::new("/srv/repo");
        assert_eq!(
            display_path(root, Path::new("/srv/repo/app/build.gradle")),
            "/app/build.gradle"
        );
        assert_eq!(
            display_path(root, Path::new("/other/gradle.lockfile")),
            "/other/gradle.lockfile"
        );
    }

    #[test]
    fn discover_respects_depth_and_excludes() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "gradle.lockfile", "a:b:1");
        write(dir.path(), "one/build.gradle", "");
        write(dir.path(), "one/two/package-lock.json", "{}");
        write(dir.path(), "node_modules/x/package-lock.json", "{}");
        write(dir.path(), "one/README.md", "");

        let registry = CatalogerRegistry::new();
        let config = ScannerConfig {
            exclude_dirs: vec!["node_modules".to_owned()],
            max_depth: 1,
            ..Default::default()
        };

        let found = discover_manifests(dir.path(), &registry, &config).unwrap();
        let relative: Vec<String> = found
            .iter()
            .map(|p| display_path(dir.path(), p))
            .collect();
        assert_eq!(relative, vec!["/gradle.lockfile", "/one/build.gradle"]);
    }

    #[test]
    fn discover_skips_oversized_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "gradle.lockfile", &"a:b:1\n".repeat(100));

        let config = ScannerConfig {
            max_file_size: 16,
            ..Default::default()
        };
        let found = discover_manifests(dir.path(), &CatalogerRegistry::new(), &config).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn discover_fails_on_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let result = discover_manifests(&missing, &CatalogerRegistry::new(), &ScannerConfig::default());
        assert!(matches!(result, Err(ScannerError::Io { .. })));
    }

    #[test]
    fn discover_fails_on_file_root() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "gradle.lockfile", "a:b:1");
        let result = discover_manifests(
            &dir.path().join("gradle.lockfile"),
            &CatalogerRegistry::new(),
            &ScannerConfig::default(),
        );
        assert!(matches!(result, Err(ScannerError::Io { .. })));
    }

    #[tokio::test]
    async fn scan_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let scanner = CatalogScannerBuilder::new().build().unwrap();
        let summary = scanner.scan(dir.path()).await.unwrap();
        assert_eq!(summary.files_discovered, 0);
        assert_eq!(summary.catalog_size, 0);
    }
}

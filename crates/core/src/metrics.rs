//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 각 크레이트는 이 상수를 사용하여 `metrics::counter!()`, `metrics::gauge!()`,
//! `metrics::histogram!()` 매크로를 호출합니다. 레코더가 설치되지 않으면
//! 매크로 호출은 아무 일도 하지 않습니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `pkgscan_`
//! - 크레이트명: `catalog_`, `scanner_`
//! - 접미어: `_total` (counter), `_seconds` (histogram), 없음 (gauge)

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 카탈로거 레이블 키 (gradle-lockfile, build-gradle, npm-lockfile)
pub const LABEL_CATALOGER: &str = "cataloger";

/// 패키지 타입 레이블 키 (deb, rpm, npm, ...)
pub const LABEL_PACKAGE_TYPE: &str = "package_type";

// ─── Catalog 메트릭 ────────────────────────────────────────────────

/// Catalog: 새로 삽입된 패키지 수 (counter, label: package_type)
pub const CATALOG_PACKAGES_ADDED_TOTAL: &str = "pkgscan_catalog_packages_added_total";

/// Catalog: 기존 레코드에 병합된 패키지 수 (counter, label: package_type)
pub const CATALOG_PACKAGES_MERGED_TOTAL: &str = "pkgscan_catalog_packages_merged_total";

/// Catalog: 삭제된 패키지 수 (counter)
pub const CATALOG_PACKAGES_DELETED_TOTAL: &str = "pkgscan_catalog_packages_deleted_total";

/// Catalog: 현재 저장된 패키지 수 (gauge)
pub const CATALOG_PACKAGES: &str = "pkgscan_catalog_packages";

// ─── Scanner 메트릭 ────────────────────────────────────────────────

/// Scanner: 파싱된 파일 수 (counter, label: cataloger)
pub const SCANNER_FILES_PARSED_TOTAL: &str = "pkgscan_scanner_files_parsed_total";

/// Scanner: 파싱 실패 수 (counter, label: cataloger)
pub const SCANNER_PARSE_ERRORS_TOTAL: &str = "pkgscan_scanner_parse_errors_total";

/// Scanner: 스캔 1회 소요 시간 (histogram, 초)
pub const SCANNER_SCAN_DURATION_SECONDS: &str = "pkgscan_scanner_scan_duration_seconds";

// ─── 히스토그램 버킷 정의 ────────────────────────────────────────────

/// 스캔 소요 시간 히스토그램 버킷 (초)
///
/// 10ms ~ 300s 범위 (디스크 I/O 포함)
pub const SCAN_DURATION_BUCKETS: [f64; 10] =
    [0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0, 30.0, 120.0, 300.0];

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// 전역 레코더 설치 후 한 번만 호출해야 합니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_gauge, describe_histogram};

    // Catalog
    describe_counter!(
        CATALOG_PACKAGES_ADDED_TOTAL,
        "Total number of package records inserted as new catalog entries"
    );
    describe_counter!(
        CATALOG_PACKAGES_MERGED_TOTAL,
        "Total number of package records merged into an existing entry"
    );
    describe_counter!(
        CATALOG_PACKAGES_DELETED_TOTAL,
        "Total number of packages deleted from the catalog"
    );
    describe_gauge!(
        CATALOG_PACKAGES,
        "Number of packages currently stored in the catalog"
    );

    // Scanner
    describe_counter!(
        SCANNER_FILES_PARSED_TOTAL,
        "Total number of manifest/lockfile files parsed"
    );
    describe_counter!(
        SCANNER_PARSE_ERRORS_TOTAL,
        "Total number of manifest/lockfile parse failures"
    );
    describe_histogram!(
        SCANNER_SCAN_DURATION_SECONDS,
        "Time to complete a single directory scan in seconds"
    );
}

//! 병합 엔진 -- 같은 id를 가진 레코드의 증거 결합
//!
//! 같은 id를 가진 두 레코드는 식별 필드가 같으므로 증거만 합칩니다.
//!
//! - 위치: 두 [`LocationSet`](crate::LocationSet)의 합집합
//! - CPE: 첫 등장 순서를 유지한 합집합 (완전히 같은 값만 제거)
//! - 메타데이터, `found_by`: 기존 레코드 값 유지 (first-write-wins)

use tracing::debug;

use crate::cpe::Cpe;
use crate::types::Package;

/// `incoming`의 증거를 `existing`에 병합합니다.
///
/// 증거는 절대 버려지지 않습니다. 병합으로 새로 추가된 위치 수를 반환합니다.
pub fn merge_into(existing: &mut Package, incoming: Package) -> usize {
    if existing.metadata != incoming.metadata {
        debug!(
            package = %existing,
            "metadata differs between records with the same id, keeping first"
        );
    }

    let before = existing.locations.len();
    existing.locations.extend(incoming.locations);
    merge_cpes(&mut existing.cpes, incoming.cpes);

    existing.locations.len() - before
}

/// 첫 등장 순서를 유지하며 CPE를 합칩니다.
pub fn merge_cpes(existing: &mut Vec<Cpe>, incoming: Vec<Cpe>) {
    for cpe in incoming {
        if !existing.contains(&cpe) {
            existing.push(cpe);
        }
    }
}

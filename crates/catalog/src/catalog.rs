//! 다중 인덱스 카탈로그
//!
//! [`Catalog`]는 병합된 패키지 레코드(id -> 패키지, 삽입 순서 보존)와
//! 두 개의 보조 인덱스를 소유합니다.
//!
//! - 타입 인덱스: [`PackageType`] -> [`OrderedIdSet`]
//! - 경로 인덱스: 실제 경로 또는 가상 경로 -> [`OrderedIdSet`]
//!
//! # 동시성
//!
//! 전체 상태는 하나의 `RwLock` 아래에 있습니다. `add` / `delete`는 쓰기 잠금을 잡은 채
//! "id 확인 -> 병합 또는 삽입 -> 두 인덱스 갱신"을 한 번에 수행하므로, 조회하는 쪽은
//! 한 인덱스에만 반영된 중간 상태를 볼 수 없습니다. 조회는 읽기 잠금 아래에서
//! 결과를 복제(snapshot)해 반환하므로 호출자가 잠금을 잡고 있지 않습니다.
//!
//! # 불변식
//!
//! - 인덱스의 모든 id는 메인 맵에 존재합니다.
//! - 경로 키는 그 경로를 가진 패키지가 하나 이상 있을 때만 존재합니다 (빈 버킷 없음).

use std::collections::HashMap;
use std::iter::FusedIterator;
use std::sync::Arc;

use indexmap::IndexMap;
use metrics::{counter, gauge};
use parking_lot::RwLock;
use tracing::{debug, trace};

use pkgscan_core::metrics::{
    CATALOG_PACKAGES, CATALOG_PACKAGES_ADDED_TOTAL, CATALOG_PACKAGES_DELETED_TOTAL,
    CATALOG_PACKAGES_MERGED_TOTAL, LABEL_PACKAGE_TYPE,
};

use crate::id::{PackageId, identity};
use crate::id_set::OrderedIdSet;
use crate::merge::merge_into;
use crate::types::{Package, PackageType};

#[derive(Debug, Default)]
struct CatalogState {
    packages: IndexMap<PackageId, Package>,
    ids_by_type: HashMap<PackageType, OrderedIdSet>,
    ids_by_path: HashMap<String, OrderedIdSet>,
}

impl CatalogState {
    fn collect<'a>(&self, ids: impl IntoIterator<Item = &'a PackageId>) -> Vec<Package> {
        ids.into_iter()
            .filter_map(|id| self.packages.get(id).cloned())
            .collect()
    }
}

/// 동시 접근 가능한 패키지 카탈로그
///
/// `Catalog::default()`는 항상 유효한 빈 카탈로그입니다.
#[derive(Debug, Default)]
pub struct Catalog {
    state: RwLock<CatalogState>,
}

impl Catalog {
    /// 빈 카탈로그를 만들고 주어진 패키지를 순서대로 추가합니다.
    pub fn new(packages: impl IntoIterator<Item = Package>) -> Self {
        let catalog = Self::default();
        for package in packages {
            catalog.add(package);
        }
        catalog
    }

    /// 패키지를 추가합니다.
    ///
    /// 같은 id의 레코드가 이미 있으면 증거(위치, CPE)를 병합하고, 들어온 레코드의
    /// 경로를 경로 인덱스에 추가합니다. 없으면 새로 삽입하고 타입/경로 인덱스에
    /// id를 추가합니다. 저장에 사용된 id를 반환합니다.
    pub fn add(&self, mut package: Package) -> PackageId {
        let id = package
            .assigned_id()
            .cloned()
            .unwrap_or_else(|| identity(&package));
        let package_type = package.package_type;
        let paths: Vec<String> = package
            .locations
            .paths()
            .into_iter()
            .map(str::to_owned)
            .collect();

        let merged = {
            let mut guard = self.state.write();
            let state = &mut *guard;

            let merged = match state.packages.get_mut(&id) {
                Some(existing) => {
                    let new_locations = merge_into(existing, package);
                    trace!(id = %id, new_locations, "merged package evidence");
                    true
                }
                None => {
                    package.assign_id(id.clone());
                    state.packages.insert(id.clone(), package);
                    state
                        .ids_by_type
                        .entry(package_type)
                        .or_default()
                        .insert(id.clone());
                    false
                }
            };

            for path in paths {
                state
                    .ids_by_path
                    .entry(path)
                    .or_default()
                    .insert(id.clone());
            }

            // 쓰기 잠금 안에서 기록해야 마지막 값이 저장 크기와 일치
            gauge!(CATALOG_PACKAGES).set(state.packages.len() as f64);
            merged
        };

        if merged {
            counter!(CATALOG_PACKAGES_MERGED_TOTAL, LABEL_PACKAGE_TYPE => package_type.as_str())
                .increment(1);
            debug!(id = %id, package_type = %package_type, "package merged into existing entry");
        } else {
            counter!(CATALOG_PACKAGES_ADDED_TOTAL, LABEL_PACKAGE_TYPE => package_type.as_str())
                .increment(1);
            debug!(id = %id, package_type = %package_type, "package added");
        }

        id
    }

    /// id로 패키지를 삭제합니다.
    ///
    /// 메인 맵, 타입 인덱스, 모든 경로 인덱스에서 제거하며 비게 된 버킷은 삭제합니다.
    /// 존재하지 않는 id는 no-op이며 `false`를 반환합니다.
    pub fn delete(&self, id: &PackageId) -> bool {
        {
            let mut guard = self.state.write();
            let state = &mut *guard;

            let Some(package) = state.packages.shift_remove(id) else {
                trace!(id = %id, "delete of unknown package ignored");
                return false;
            };

            if let Some(bucket) = state.ids_by_type.get_mut(&package.package_type) {
                bucket.remove(id);
                if bucket.is_empty() {
                    state.ids_by_type.remove(&package.package_type);
                }
            }

            for path in package.locations.paths() {
                if let Some(bucket) = state.ids_by_path.get_mut(path) {
                    bucket.remove(id);
                    if bucket.is_empty() {
                        state.ids_by_path.remove(path);
                    }
                }
            }

            gauge!(CATALOG_PACKAGES).set(state.packages.len() as f64);
        }

        counter!(CATALOG_PACKAGES_DELETED_TOTAL).increment(1);
        debug!(id = %id, "package deleted");
        true
    }

    /// id로 패키지를 조회합니다.
    pub fn get(&self, id: &PackageId) -> Option<Package> {
        self.state.read().packages.get(id).cloned()
    }

    /// 실제 경로 또는 가상 경로가 `path`인 위치를 가진 모든 패키지를 반환합니다.
    ///
    /// 경로 버킷의 삽입 순서를 따릅니다. 알 수 없는 경로는 빈 결과입니다.
    pub fn packages_by_path(&self, path: &str) -> Vec<Package> {
        let state = self.state.read();
        state
            .ids_by_path
            .get(path)
            .map(|bucket| state.collect(bucket))
            .unwrap_or_default()
    }

    /// 패키지를 열거합니다.
    ///
    /// `types`가 비어 있으면 전체 패키지를 카탈로그 삽입 순서로, 아니면 주어진 타입
    /// 순서대로 각 타입 버킷의 삽입 순서로 반환합니다. 중복된 타입은 한 번만 처리합니다.
    /// 결과는 읽기 잠금 아래에서 만든 스냅샷입니다.
    pub fn enumerate(&self, types: &[PackageType]) -> Packages {
        let state = self.state.read();

        let packages = if types.is_empty() {
            state.packages.values().cloned().collect()
        } else {
            let mut seen = Vec::with_capacity(types.len());
            types
                .iter()
                .filter(|ty| {
                    if seen.contains(*ty) {
                        false
                    } else {
                        seen.push(**ty);
                        true
                    }
                })
                .filter_map(|ty| state.ids_by_type.get(ty))
                .flat_map(|bucket| state.collect(bucket))
                .collect()
        };

        Packages::new(packages)
    }

    /// 이름, 버전, 타입, 첫 위치 순으로 정렬된 패키지 목록을 반환합니다.
    pub fn sorted(&self, types: &[PackageType]) -> Vec<Package> {
        let mut packages: Vec<Package> = self.enumerate(types).collect();
        packages.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.version.cmp(&b.version))
                .then_with(|| a.package_type.cmp(&b.package_type))
                .then_with(|| a.locations.iter().next().cmp(&b.locations.iter().next()))
        });
        packages
    }

    /// 저장된 패키지 수
    pub fn package_count(&self) -> usize {
        self.state.read().packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().packages.is_empty()
    }

    /// 경로 인덱스의 키 목록 (정렬됨)
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.state.read().ids_by_path.keys().cloned().collect();
        paths.sort();
        paths
    }

    /// 타입 인덱스의 키 목록 (정렬됨)
    pub fn package_types(&self) -> Vec<PackageType> {
        let mut types: Vec<PackageType> =
            self.state.read().ids_by_type.keys().copied().collect();
        types.sort();
        types
    }
}

impl FromIterator<Package> for Catalog {
    fn from_iter<I: IntoIterator<Item = Package>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// 카탈로그 스냅샷 위의 패키지 이터레이터
#[derive(Debug, Clone, Default)]
pub struct Packages {
    inner: std::vec::IntoIter<Package>,
}

impl Packages {
    fn new(packages: Vec<Package>) -> Self {
        Self {
            inner: packages.into_iter(),
        }
    }
}

impl Iterator for Packages {
    type Item = Package;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Packages {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl ExactSizeIterator for Packages {}

impl FusedIterator for Packages {}

/// 패키지 조회 인터페이스
///
/// 보고서 / 관계 생성기가 사용하는 읽기 전용 경계입니다. 카탈로그가 없는 경우
/// (`Option::None`)도 빈 카탈로그로 취급하여 같은 방식으로 조회할 수 있습니다.
pub trait PackageSource {
    /// id로 패키지를 조회합니다.
    fn package(&self, id: &PackageId) -> Option<Package>;

    /// 경로로 패키지를 조회합니다.
    fn packages_by_path(&self, path: &str) -> Vec<Package>;

    /// 타입으로 패키지를 열거합니다 (빈 목록이면 전체).
    fn enumerate(&self, types: &[PackageType]) -> Packages;

    /// 저장된 패키지 수
    fn package_count(&self) -> usize;
}

impl PackageSource for Catalog {
    fn package(&self, id: &PackageId) -> Option<Package> {
        Catalog::get(self, id)
    }

    fn packages_by_path(&self, path: &str) -> Vec<Package> {
        Catalog::packages_by_path(self, path)
    }

    fn enumerate(&self, types: &[PackageType]) -> Packages {
        Catalog::enumerate(self, types)
    }

    fn package_count(&self) -> usize {
        Catalog::package_count(self)
    }
}

impl<T: PackageSource + ?Sized> PackageSource for &T {
    fn package(&self, id: &PackageId) -> Option<Package> {
        (**self).package(id)
    }

    fn packages_by_path(&self, path: &str) -> Vec<Package> {
        (**self).packages_by_path(path)
    }

    fn enumerate(&self, types: &[PackageType]) -> Packages {
        (**self).enumerate(types)
    }

    fn package_count(&self) -> usize {
        (**self).package_count()
    }
}

impl<T: PackageSource + ?Sized> PackageSource for Arc<T> {
    fn package(&self, id: &PackageId) -> Option<Package> {
        (**self).package(id)
    }

    fn packages_by_path(&self, path: &str) -> Vec<Package> {
        (**self).packages_by_path(path)
    }

    fn enumerate(&self, types: &[PackageType]) -> Packages {
        (**self).enumerate(types)
    }

    fn package_count(&self) -> usize {
        (**self).package_count()
    }
}

impl<T: PackageSource> PackageSource for Option<T> {
    fn package(&self, id: &PackageId) -> Option<Package> {
        self.as_ref().and_then(|source| source.package(id))
    }

    fn packages_by_path(&self, path: &str) -> Vec<Package> {
        self.as_ref()
            .map(|source| source.packages_by_path(path))
            .unwrap_or_default()
    }

    fn enumerate(&self, types: &[PackageType]) -> Packages {
        self.as_ref()
            .map(|source| source.enumerate(types))
            .unwrap_or_default()
    }

    fn package_count(&self) -> usize {
        self.as_ref().map_or(0, |source| source.package_count())
    }
}

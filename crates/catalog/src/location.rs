//! 파일 위치 -- 패키지 증거가 발견된 좌표
//!
//! [`Location`]은 실제 경로와 파일시스템(레이어) id로 이루어진 [`Coordinates`]에
//! 선택적인 가상 경로(심볼릭 링크 등 해석 이전 경로)를 더한 값입니다.
//! [`LocationSet`]은 (실제 경로, 파일시스템 id, 가상 경로) 튜플 전체로 중복을 제거하며
//! 항상 정렬된 순서로 순회합니다.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// 파일 좌표
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinates {
    /// 스캔 대상 파일시스템에서 해석된 절대 경로
    pub real_path: String,
    /// 여러 파일시스템(레이어)을 합칠 때 출처를 구분하는 id
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub file_system_id: String,
}

impl Coordinates {
    pub fn new(real_path: impl Into<String>, file_system_id: impl Into<String>) -> Self {
        Self {
            real_path: real_path.into(),
            file_system_id: file_system_id.into(),
        }
    }
}

/// 패키지 증거 위치
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    /// 실제 좌표
    pub coordinates: Coordinates,
    /// 해석 이전 경로 (없으면 `None`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_path: Option<String>,
}

impl Location {
    /// 가상 경로 없는 위치를 생성합니다.
    pub fn new(real_path: impl Into<String>) -> Self {
        Self {
            coordinates: Coordinates::new(real_path, ""),
            virtual_path: None,
        }
    }

    /// 실제 경로와 가상 경로로 위치를 생성합니다.
    ///
    /// 빈 가상 경로는 `None`으로 취급합니다.
    pub fn with_virtual_path(real_path: impl Into<String>, virtual_path: impl Into<String>) -> Self {
        let virtual_path = virtual_path.into();
        Self {
            coordinates: Coordinates::new(real_path, ""),
            virtual_path: (!virtual_path.is_empty()).then_some(virtual_path),
        }
    }

    /// 파일시스템 id를 지정합니다.
    pub fn in_file_system(mut self, file_system_id: impl Into<String>) -> Self {
        self.coordinates.file_system_id = file_system_id.into();
        self
    }

    pub fn real_path(&self) -> &str {
        &self.coordinates.real_path
    }

    pub fn virtual_path(&self) -> Option<&str> {
        self.virtual_path.as_deref()
    }

    /// 경로 인덱스에 사용되는 경로들 (실제 경로, 그와 다른 가상 경로)
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        let real = self.real_path();
        std::iter::once(real).chain(self.virtual_path().filter(move |v| *v != real))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.virtual_path() {
            Some(virtual_path) if virtual_path != self.real_path() => {
                write!(f, "{} (via {})", self.real_path(), virtual_path)
            }
            _ => f.write_str(self.real_path()),
        }
    }
}

/// 위치 집합
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationSet {
    locations: BTreeSet<Location>,
}

impl LocationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 위치를 추가합니다. 새로 추가되었으면 `true`.
    pub fn add(&mut self, location: Location) -> bool {
        self.locations.insert(location)
    }

    pub fn contains(&self, location: &Location) -> bool {
        self.locations.contains(location)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    /// 정렬된 위치 목록을 반환합니다.
    pub fn to_vec(&self) -> Vec<Location> {
        self.locations.iter().cloned().collect()
    }

    /// 모든 위치의 실제 경로와 가상 경로 (중복 제거, 첫 등장 순서)
    pub fn paths(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.locations
            .iter()
            .flat_map(Location::paths)
            .filter(|p| seen.insert(*p))
            .collect()
    }
}

impl Extend<Location> for LocationSet {
    fn extend<I: IntoIterator<Item = Location>>(&mut self, iter: I) {
        self.locations.extend(iter);
    }
}

impl FromIterator<Location> for LocationSet {
    fn from_iter<I: IntoIterator<Item = Location>>(iter: I) -> Self {
        Self {
            locations: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for LocationSet {
    type Item = Location;
    type IntoIter = std::collections::btree_set::IntoIter<Location>;

    fn into_iter(self) -> Self::IntoIter {
        self.locations.into_iter()
    }
}

impl<'a> IntoIterator for &'a LocationSet {
    type Item = &'a Location;
    type IntoIter = std::collections::btree_set::Iter<'a, Location>;

    fn into_iter(self) -> Self::IntoIter {
        self.locations.iter()
    }
}

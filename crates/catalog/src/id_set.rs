//! 삽입 순서를 보존하는 id 집합
//!
//! 병렬 카탈로거의 실행 순서는 비결정적이지만, 같은 add 순서에 대해서는
//! 항상 같은 열거 순서를 보장해야 합니다. [`OrderedIdSet`]은 모든 인덱스 버킷의
//! 기반이 되는 "첫 삽입 순서" 집합입니다.

use indexmap::IndexSet;

use crate::id::PackageId;

/// 첫 삽입 순서를 보존하는 중복 제거 id 집합
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedIdSet {
    ids: IndexSet<PackageId>,
}

impl OrderedIdSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 아직 없는 id들을 순서대로 뒤에 추가합니다. 이미 있는 id는 무시됩니다.
    pub fn add<I>(&mut self, ids: I)
    where
        I: IntoIterator,
        I::Item: Into<PackageId>,
    {
        for id in ids {
            self.ids.insert(id.into());
        }
    }

    /// id 하나를 추가합니다. 새로 추가되었으면 `true`.
    pub fn insert(&mut self, id: PackageId) -> bool {
        self.ids.insert(id)
    }

    /// id를 제거하고 나머지 순서를 유지합니다.
    pub fn remove(&mut self, id: &PackageId) -> bool {
        self.ids.shift_remove(id)
    }

    pub fn contains(&self, id: &PackageId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// 삽입 순서대로 순회합니다.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &PackageId> + ExactSizeIterator {
        self.ids.iter()
    }

    pub fn to_vec(&self) -> Vec<PackageId> {
        self.ids.iter().cloned().collect()
    }
}

impl<T: Into<PackageId>> FromIterator<T> for OrderedIdSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.add(iter);
        set
    }
}

impl<'a> IntoIterator for &'a OrderedIdSet {
    type Item = &'a PackageId;
    type IntoIter = indexmap::set::Iter<'a, PackageId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

//! Lookup of color cubes by board attributes, used to shortlist collision candidates.

use std::collections::{
    BTreeMap,
    BTreeSet,
};


/// Integer attribute a cube is indexed under.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Attribute {
    /// Board column.
    X,
    /// Board row.
    Y,
    /// Color, as a packed RGB value.
    Color,
}

/// Something that can find the colliders near a place.
pub trait ColliderIndex {
    /// Ids of colliders whose `attribute` lies in `min..max`.
    fn query_range(&self, attribute: Attribute, min: i64, max: i64) -> Vec<usize>;
}


/// Single-column indexes from attribute value to cube ids.
#[derive(Debug, Clone, Default)]
pub struct CubeIndex {
    indexes: BTreeMap<Attribute, BTreeMap<i64, Vec<usize>>>,
}

impl CubeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index cube `id` under each of the given attribute values.
    pub fn insert<I>(&mut self, id: usize, attributes: I)
    where
        I: IntoIterator<Item=(Attribute, i64)>,
    {
        for (attribute, value) in attributes {
            self.indexes
                .entry(attribute)
                .or_default()
                .entry(value)
                .or_default()
                .push(id);
        }
    }

    /// Un-index cube `id` everywhere.
    pub fn remove(&mut self, id: usize) {
        for index in self.indexes.values_mut() {
            for ids in index.values_mut() {
                ids.retain(|&other| other != id);
            }
            index.retain(|_, ids| !ids.is_empty());
        }
    }

    pub fn clear(&mut self) {
        self.indexes.clear();
    }

    /// Ids of cubes with exactly `value` for `attribute`, in insertion order.
    pub fn query(&self, attribute: Attribute, value: i64) -> Vec<usize> {
        self.indexes
            .get(&attribute)
            .and_then(|index| index.get(&value))
            .cloned()
            .unwrap_or_default()
    }

    /// Ids of cubes which satisfy every one of the given half-open ranges, ascending.
    pub fn query_ranges(&self, ranges: &[(Attribute, i64, i64)]) -> Vec<usize> {
        let mut result: Option<BTreeSet<usize>> = None;
        for &(attribute, min, max) in ranges {
            let ids = self.query_range(attribute, min, max)
                .into_iter()
                .collect::<BTreeSet<_>>();
            result = Some(match result {
                Some(result) => result.intersection(&ids).copied().collect(),
                None => ids,
            });
        }
        result.map(|ids| ids.into_iter().collect()).unwrap_or_default()
    }
}

impl ColliderIndex for CubeIndex {
    fn query_range(&self, attribute: Attribute, min: i64, max: i64) -> Vec<usize> {
        if min >= max {
            return Vec::new();
        }
        self.indexes
            .get(&attribute)
            .map(|index| index
                .range(min..max)
                .flat_map(|(_, ids)| ids.iter().copied())
                .collect())
            .unwrap_or_default()
    }
}


#[cfg(test)]
fn test_index() -> CubeIndex {
    let mut index = CubeIndex::new();
    for (id, (x, y)) in [(0, 0), (1, 0), (2, 0), (0, 1), (5, 5)].into_iter().enumerate() {
        index.insert(id, [
            (Attribute::X, x),
            (Attribute::Y, y),
            (Attribute::Color, (id % 2) as i64),
        ]);
    }
    index
}

#[test]
fn test_query_exact() {
    let index = test_index();
    assert_eq!(index.query(Attribute::Y, 0), vec![0, 1, 2]);
    assert_eq!(index.query(Attribute::Color, 1), vec![1, 3]);
    assert!(index.query(Attribute::X, 100).is_empty());
}

#[test]
fn test_query_range_half_open() {
    let index = test_index();
    assert_eq!(index.query_range(Attribute::X, 0, 2), vec![0, 3, 1]);
    assert!(index.query_range(Attribute::X, 2, 2).is_empty());
    assert!(index.query_range(Attribute::X, 3, 1).is_empty());
}

#[test]
fn test_query_ranges_intersects() {
    let index = test_index();
    assert_eq!(
        index.query_ranges(&[(Attribute::X, -2, 3), (Attribute::Y, -2, 1)]),
        vec![0, 1, 2],
    );
    assert_eq!(index.query_ranges(&[(Attribute::X, 4, 7), (Attribute::Y, 4, 7)]), vec![4]);
    assert!(index.query_ranges(&[]).is_empty());
}

#[test]
fn test_remove() {
    let mut index = test_index();
    index.remove(1);
    assert_eq!(index.query(Attribute::Y, 0), vec![0, 2]);
    assert_eq!(index.query(Attribute::Color, 1), vec![3]);
}

use std::fmt;

use crate::DocId;

/// A set of `u32` within `[0, 64)` packed in a single `u64`.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct TinySet(u64);

impl fmt::Debug for TinySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.into_iter().collect::<Vec<u32>>().fmt(f)
    }
}

/// Iterator over the elements of a [`TinySet`], lowest first.
pub struct TinySetIterator(TinySet);

impl Iterator for TinySetIterator {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_lowest()
    }
}

impl IntoIterator for TinySet {
    type Item = u32;
    type IntoIter = TinySetIterator;
    fn into_iter(self) -> Self::IntoIter {
        TinySetIterator(self)
    }
}

impl TinySet {
    /// Returns an empty `TinySet`.
    #[inline]
    pub fn empty() -> TinySet {
        TinySet(0u64)
    }

    /// Returns true iff the `TinySet` contains the element `el`.
    #[inline]
    pub fn contains(self, el: u32) -> bool {
        !self.intersect(TinySet::singleton(el)).is_empty()
    }

    /// Returns the intersection of `self` and `other`
    #[inline]
    #[must_use]
    pub fn intersect(self, other: TinySet) -> TinySet {
        TinySet(self.0 & other.0)
    }

    /// Creates a new `TinySet` containing only one element
    /// within `[0; 64[`
    #[inline]
    pub fn singleton(el: u32) -> TinySet {
        TinySet(1u64 << u64::from(el))
    }

    /// Insert a new element within [0..64)
    ///
    /// returns true if the set changed
    #[inline]
    pub fn insert_mut(&mut self, el: u32) -> bool {
        let old = *self;
        self.0 |= TinySet::singleton(el).0;
        old != *self
    }

    /// Returns true iff the `TinySet` is empty.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0u64
    }

    /// Returns the lowest element in the `TinySet`
    /// and removes it.
    #[inline]
    pub fn pop_lowest(&mut self) -> Option<u32> {
        if self.is_empty() {
            None
        } else {
            let lowest = self.0.trailing_zeros();
            self.0 ^= TinySet::singleton(lowest).0;
            Some(lowest)
        }
    }
}

/// Fixed capacity set of doc ids.
///
/// This is the resolved form of a filter over one segment: building it costs one pass over
/// the matching documents, and membership tests are then O(1).
#[derive(Clone)]
pub struct BitSet {
    tinysets: Box<[TinySet]>,
    len: u64,
    max_value: u32,
}

impl fmt::Debug for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitSet")
            .field("len", &self.len)
            .field("max_value", &self.max_value)
            .finish()
    }
}

fn num_buckets(max_val: u32) -> u32 {
    max_val.div_ceil(64u32)
}

impl BitSet {
    /// Create a new `BitSet` that may contain elements
    /// within `[0, max_val)`.
    pub fn with_max_value(max_value: u32) -> BitSet {
        let num_buckets = num_buckets(max_value);
        let tinysets = vec![TinySet::empty(); num_buckets as usize].into_boxed_slice();
        BitSet {
            tinysets,
            len: 0,
            max_value,
        }
    }

    /// Returns the number of elements in the `BitSet`.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Inserts an element in the `BitSet`
    #[inline]
    pub fn insert(&mut self, el: DocId) {
        // we do not check saturated els.
        let higher = el / 64u32;
        let lower = el % 64u32;
        self.len += u64::from(self.tinysets[higher as usize].insert_mut(lower));
    }

    /// Returns true iff the elements is in the `BitSet`.
    ///
    /// Elements outside of `[0, max_value)` are never contained.
    #[inline]
    pub fn contains(&self, el: DocId) -> bool {
        if el >= self.max_value {
            return false;
        }
        self.tinysets[(el / 64u32) as usize].contains(el % 64)
    }

    /// Maximum value the bitset may contain.
    /// (Note this is not the maximum value contained in the set.)
    #[inline]
    pub fn max_value(&self) -> u32 {
        self.max_value
    }

    /// Iterates over the elements of the set in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = DocId> + '_ {
        self.tinysets
            .iter()
            .enumerate()
            .flat_map(|(bucket, tinyset)| {
                let bucket_base = bucket as u32 * 64;
                tinyset.into_iter().map(move |lower| bucket_base | lower)
            })
    }
}

impl FromIterator<DocId> for BitSet {
    fn from_iter<I: IntoIterator<Item = DocId>>(iter: I) -> Self {
        let docs: Vec<DocId> = iter.into_iter().collect();
        let max_value = docs.iter().copied().max().map(|doc| doc + 1).unwrap_or(0);
        let mut bitset = BitSet::with_max_value(max_value);
        for doc in docs {
            bitset.insert(doc);
        }
        bitset
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::{BitSet, TinySet};

    #[test]
    fn test_tiny_set() {
        let mut tinyset = TinySet::empty();
        assert!(tinyset.is_empty());
        assert!(tinyset.insert_mut(7u32));
        assert!(!tinyset.insert_mut(7u32));
        assert!(tinyset.insert_mut(63u32));
        assert!(tinyset.contains(63u32));
        assert!(!tinyset.contains(8u32));
        assert_eq!(tinyset.into_iter().collect::<Vec<u32>>(), vec![7u32, 63u32]);
    }

    #[test]
    fn test_bitset_out_of_range_is_not_contained() {
        let mut bitset = BitSet::with_max_value(65);
        bitset.insert(64);
        assert!(bitset.contains(64));
        assert!(!bitset.contains(65));
        assert!(!bitset.contains(10_000));
        assert_eq!(bitset.len(), 1);
    }

    #[test]
    fn test_bitset_empty() {
        let bitset = BitSet::with_max_value(0);
        assert_eq!(bitset.len(), 0);
        assert!(!bitset.contains(0));
        assert_eq!(bitset.iter().count(), 0);
    }

    proptest! {
        #[test]
        fn test_bitset_matches_btreeset(els in proptest::collection::vec(0u32..1_000u32, 0..200)) {
            let expected: BTreeSet<u32> = els.iter().copied().collect();
            let bitset: BitSet = els.iter().copied().collect();
            prop_assert_eq!(bitset.len(), expected.len());
            for el in 0u32..1_001u32 {
                prop_assert_eq!(bitset.contains(el), expected.contains(&el));
            }
            prop_assert_eq!(bitset.iter().collect::<Vec<u32>>(), expected.into_iter().collect::<Vec<u32>>());
        }
    }
}

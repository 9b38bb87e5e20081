use std::fmt;
use std::hash::{Hash, Hasher};

use downcast_rs::impl_downcast;

use crate::query::{DynEq, EnableScoring, Query};
use crate::{BitSet, DocId, SegmentReader};

/// Answers "does this document belong to the filter" for one segment.
///
/// A `Membership` is resolved once per segment and then queried for every
/// scored document, so `contains` is expected to be cheap.
pub trait Membership: Send + Sync {
    /// Returns true iff `doc` is a member of the set.
    fn contains(&self, doc: DocId) -> bool;
}

impl Membership for BitSet {
    #[inline]
    fn contains(&self, doc: DocId) -> bool {
        BitSet::contains(self, doc)
    }
}

/// A boolean membership test over documents, independent of relevance.
///
/// Filters are compared and hashed structurally, just like queries: implementors
/// are expected to be `PartialEq + Hash`.
pub trait Filter: DynEq + Send + Sync + downcast_rs::Downcast + fmt::Debug {
    /// Resolves the set of documents of the segment matching the filter.
    fn membership(&self, reader: &SegmentReader) -> crate::Result<Box<dyn Membership>>;
}

impl_downcast!(Filter);

impl PartialEq for dyn Filter {
    fn eq(&self, other: &dyn Filter) -> bool {
        self.dyn_eq(other.as_any())
    }
}

impl Eq for dyn Filter {}

impl Hash for dyn Filter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dyn_hash(state);
    }
}

/// Turns any [`Query`] into a [`Filter`].
///
/// The query is run with scoring disabled and the documents it matches are
/// gathered into a [`BitSet`].
#[derive(Clone, Hash)]
pub struct QueryFilter {
    query: Box<dyn Query>,
}

impl QueryFilter {
    /// Creates a filter matching the documents matched by `query`.
    pub fn new<Q: Query>(query: Q) -> QueryFilter {
        QueryFilter {
            query: Box::new(query),
        }
    }

    /// Returns the wrapped query.
    pub fn query(&self) -> &dyn Query {
        self.query.as_ref()
    }
}

impl PartialEq for QueryFilter {
    fn eq(&self, other: &QueryFilter) -> bool {
        self.query.eq(&other.query)
    }
}

impl Eq for QueryFilter {}

impl From<Box<dyn Query>> for QueryFilter {
    fn from(query: Box<dyn Query>) -> QueryFilter {
        QueryFilter { query }
    }
}

impl fmt::Debug for QueryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QueryFilter({:?})", self.query)
    }
}

impl Filter for QueryFilter {
    fn membership(&self, reader: &SegmentReader) -> crate::Result<Box<dyn Membership>> {
        let weight = self.query.weight(EnableScoring::disabled())?;
        let mut bitset = BitSet::with_max_value(reader.max_doc());
        weight.for_each_no_score(reader, &mut |doc| bitset.insert(doc))?;
        debug!(
            "resolved {:?} on segment #{}: {} matching docs",
            self,
            reader.segment_ord(),
            bitset.len()
        );
        Ok(Box::new(bitset))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use std::sync::Arc;

    use super::{Filter, QueryFilter};
    use crate::query::{AllQuery, DocIdSetQuery, EmptyQuery};
    use crate::{DocAddress, SegmentReader};

    fn hash_of(filter: &dyn Filter) -> u64 {
        let mut hasher = DefaultHasher::new();
        filter.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_query_filter_membership() -> crate::Result<()> {
        let filter = QueryFilter::new(DocIdSetQuery::new(vec![
            DocAddress::new(0, 1),
            DocAddress::new(0, 3),
            DocAddress::new(1, 0),
        ]));
        let membership = filter.membership(&SegmentReader::new(0, 4))?;
        let members: Vec<u32> = (0..4).filter(|&doc| membership.contains(doc)).collect();
        assert_eq!(members, vec![1, 3]);
        let membership = filter.membership(&SegmentReader::new(1, 4))?;
        assert!(membership.contains(0));
        assert!(!membership.contains(1));
        Ok(())
    }

    #[test]
    fn test_query_filter_all_and_empty() -> crate::Result<()> {
        let reader = SegmentReader::new(0, 70);
        let all = QueryFilter::new(AllQuery).membership(&reader)?;
        let empty = QueryFilter::new(EmptyQuery).membership(&reader)?;
        assert!((0..70).all(|doc| all.contains(doc)));
        assert!(!all.contains(70));
        assert!((0..70).all(|doc| !empty.contains(doc)));
        Ok(())
    }

    #[test]
    fn test_filter_equality() {
        let left: Arc<dyn Filter> = Arc::new(QueryFilter::new(AllQuery));
        let right: Arc<dyn Filter> = Arc::new(QueryFilter::new(AllQuery));
        let other: Arc<dyn Filter> = Arc::new(QueryFilter::new(EmptyQuery));
        assert!((*left).eq(&*right));
        assert!(!(*left).eq(&*other));
        let filter = QueryFilter::new(DocIdSetQuery::new(vec![DocAddress::new(0, 1)]));
        assert!(filter.eq(&filter.clone()));
        assert!(!filter.eq(&QueryFilter::new(AllQuery)));
        assert_eq!(hash_of(left.as_ref()), hash_of(right.as_ref()));
    }
}

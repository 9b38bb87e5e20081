use std::collections::BTreeSet;
use std::sync::Arc;

use crate::query::explanation::doc_out_of_range;
use crate::query::{ConstScorer, EnableScoring, Explanation, Query, Scorer, VecDocSet, Weight};
use crate::{DocAddress, DocId, Score, SegmentReader};

/// Query matching an explicit set of documents.
///
/// Every matched document gets the score 1.0. This is the simplest way to express a
/// "term filter" when documents are known by address.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DocIdSetQuery {
    doc_addresses: Arc<BTreeSet<DocAddress>>,
}

impl DocIdSetQuery {
    /// Creates a query matching the given documents.
    pub fn new(doc_addresses: impl IntoIterator<Item = DocAddress>) -> DocIdSetQuery {
        DocIdSetQuery {
            doc_addresses: Arc::new(doc_addresses.into_iter().collect()),
        }
    }
}

impl Query for DocIdSetQuery {
    fn weight(&self, _enable_scoring: EnableScoring<'_>) -> crate::Result<Box<dyn Weight>> {
        Ok(Box::new(DocIdSetWeight {
            doc_addresses: self.doc_addresses.clone(),
        }))
    }
}

struct DocIdSetWeight {
    doc_addresses: Arc<BTreeSet<DocAddress>>,
}

impl DocIdSetWeight {
    fn segment_docs(&self, reader: &SegmentReader) -> Vec<DocId> {
        let segment_ord = reader.segment_ord();
        self.doc_addresses
            .range(DocAddress::new(segment_ord, 0)..DocAddress::new(segment_ord, reader.max_doc()))
            .map(|doc_address| doc_address.doc_id)
            .collect()
    }
}

impl Weight for DocIdSetWeight {
    fn scorer(&self, reader: &SegmentReader, boost: Score) -> crate::Result<Box<dyn Scorer>> {
        let docset = VecDocSet::from(self.segment_docs(reader));
        Ok(Box::new(ConstScorer::new(docset, boost)))
    }

    fn explain(&self, reader: &SegmentReader, doc: DocId) -> crate::Result<Explanation> {
        if doc >= reader.max_doc() {
            return Err(doc_out_of_range(doc, reader.max_doc()));
        }
        let doc_address = DocAddress::new(reader.segment_ord(), doc);
        if self.doc_addresses.contains(&doc_address) {
            Ok(Explanation::new("DocIdSetQuery", 1.0))
        } else {
            Ok(Explanation::no_match("DocIdSetQuery"))
        }
    }

    fn count(&self, reader: &SegmentReader) -> crate::Result<u32> {
        Ok(self.segment_docs(reader).len() as u32)
    }
}

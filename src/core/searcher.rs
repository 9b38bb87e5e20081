use std::fmt;

use crate::core::{Executor, SegmentReader};
use crate::query::{EnableScoring, Explanation, Query, Weight};
use crate::{DocAddress, FunctionScoreError, Score, SegmentOrdinal};

/// Holds a list of `SegmentReader`s ready for search.
///
/// Each segment is an independent evaluation scope: scoring a query builds one
/// scorer per segment, and nothing is shared between those scorers but the
/// (immutable) `Weight`.
pub struct Searcher {
    segment_readers: Vec<SegmentReader>,
}

impl Searcher {
    /// Creates a searcher over the given segments.
    ///
    /// The i-th reader is expected to have `i` as its segment ordinal.
    pub fn new(segment_readers: Vec<SegmentReader>) -> Searcher {
        debug_assert!(segment_readers
            .iter()
            .enumerate()
            .all(|(ord, reader)| reader.segment_ord() as usize == ord));
        Searcher { segment_readers }
    }

    /// Returns the overall number of documents in the index.
    pub fn num_docs(&self) -> u64 {
        self.segment_readers
            .iter()
            .map(|segment_reader| u64::from(segment_reader.max_doc()))
            .sum::<u64>()
    }

    /// Return the list of segment readers
    pub fn segment_readers(&self) -> &[SegmentReader] {
        &self.segment_readers
    }

    /// Returns the segment_reader associated with the given segment_ord
    ///
    /// Panics if `segment_ord` is out of range. See
    /// [`get_segment_reader(...)`](Searcher::get_segment_reader).
    pub fn segment_reader(&self, segment_ord: SegmentOrdinal) -> &SegmentReader {
        &self.segment_readers[segment_ord as usize]
    }

    /// Returns the segment_reader associated with the given segment_ord, or an
    /// `InvalidArgument` error if the searcher has no such segment.
    pub fn get_segment_reader(
        &self,
        segment_ord: SegmentOrdinal,
    ) -> crate::Result<&SegmentReader> {
        self.segment_readers
            .get(segment_ord as usize)
            .ok_or_else(|| {
                FunctionScoreError::InvalidArgument(format!(
                    "Segment #({segment_ord}) is out of range (num segments: {})",
                    self.segment_readers.len()
                ))
            })
    }

    /// Scores all of the documents matching `query`.
    ///
    /// Hits are returned in `DocAddress` order. Ranking them is left to the caller.
    pub fn search(&self, query: &dyn Query) -> crate::Result<Vec<(Score, DocAddress)>> {
        self.search_with_executor(query, &Executor::single_thread())
    }

    /// Same as [`search(...)`](Searcher::search) but segments are scored
    /// through the given executor.
    ///
    /// The first error raised by any segment aborts the search.
    pub fn search_with_executor(
        &self,
        query: &dyn Query,
        executor: &Executor,
    ) -> crate::Result<Vec<(Score, DocAddress)>> {
        let weight = query.weight(EnableScoring::enabled_from_searcher(self))?;
        let segment_hits = executor.map(
            |segment_reader: &SegmentReader| search_segment(weight.as_ref(), segment_reader),
            self.segment_readers.iter(),
        )?;
        Ok(segment_hits.into_iter().flatten().collect())
    }

    /// Returns the explanation of the score of the document at `doc_address`.
    pub fn explain(&self, query: &dyn Query, doc_address: DocAddress) -> crate::Result<Explanation> {
        query.explain(self, doc_address)
    }
}

fn search_segment(
    weight: &dyn Weight,
    segment_reader: &SegmentReader,
) -> crate::Result<Vec<(Score, DocAddress)>> {
    let segment_ord = segment_reader.segment_ord();
    let mut hits = Vec::new();
    weight.for_each(segment_reader, &mut |doc, score| {
        hits.push((score, DocAddress::new(segment_ord, doc)));
    })?;
    Ok(hits)
}

impl fmt::Debug for Searcher {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let segment_ords = self
            .segment_readers
            .iter()
            .map(SegmentReader::segment_ord)
            .collect::<Vec<_>>();
        write!(f, "Searcher({segment_ords:?})")
    }
}

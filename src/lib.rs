#![doc(html_logo_url = "http://fulmicoton.com/tantivy-files/logo_tantivy_320.png")]
#![warn(missing_docs)]
#![allow(clippy::len_without_is_empty)]

//! # `tantivy-function-score`
//!
//! Filter/function scoring on top of a tantivy-style `Query` / `Weight` / `Scorer`
//! stack.
//!
//! A [`FiltersFunctionScoreQuery`](query::FiltersFunctionScoreQuery) wraps a sub query
//! and an ordered list of `(filter, function)` bindings. For every document matched by
//! the sub query, the functions of the bindings whose filter contains the document are
//! evaluated and their outputs are combined according to a
//! [`ScoreMode`](query::ScoreMode).
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use tantivy_function_score::query::{
//!     AllQuery, BoostFactorFunction, DocIdSetQuery, FiltersFunctionScoreQuery, QueryFilter,
//!     ScoreMode,
//! };
//! use tantivy_function_score::{DocAddress, Searcher, SegmentReader};
//!
//! # fn main() -> tantivy_function_score::Result<()> {
//! let searcher = Searcher::new(vec![SegmentReader::new(0, 4)]);
//! let red = QueryFilter::new(DocIdSetQuery::new(vec![
//!     DocAddress::new(0, 0),
//!     DocAddress::new(0, 2),
//! ]));
//! let query = FiltersFunctionScoreQuery::builder(Box::new(AllQuery))
//!     .score_mode(ScoreMode::Total)
//!     .add(Arc::new(red), Arc::new(BoostFactorFunction::new(5.0)))
//!     .build()?;
//! let hits = searcher.search(&query)?;
//! assert_eq!(hits[0], (5.0, DocAddress::new(0, 0)));
//! assert_eq!(hits[1], (1.0, DocAddress::new(0, 1)));
//! # Ok(())
//! # }
//! ```

#[macro_use]
extern crate log;

mod bitset;
mod core;
mod docset;
mod error;

pub mod query;

use serde::{Deserialize, Serialize};

pub use crate::bitset::BitSet;
pub use crate::core::{Executor, Searcher, SegmentReader};
pub use crate::docset::{DocSet, TERMINATED};
pub use crate::error::FunctionScoreError;

/// Tantivy-style result type.
pub type Result<T> = std::result::Result<T, FunctionScoreError>;

/// A `u32` identifying a document within a segment.
/// Documents have their `DocId` assigned incrementally,
/// as they are added in the segment.
pub type DocId = u32;

/// A f32 that represents the relevance of the document to the query
pub type Score = f32;

/// A `SegmentOrdinal` identifies a segment, within a `Searcher`.
pub type SegmentOrdinal = u32;

/// `DocAddress` contains all the necessary information
/// to identify a document given a `Searcher` object.
///
/// It consists of an id identifying its segment, and
/// a segment-local `DocId`.
///
/// The id used for the segment is actually an ordinal
/// in the list of `Segment`s held by a `Searcher`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct DocAddress {
    /// The segment ordinal id that identifies the segment
    /// hosting the document in the `Searcher` it is called from.
    pub segment_ord: SegmentOrdinal,
    /// The segment-local `DocId`.
    pub doc_id: DocId,
}

impl DocAddress {
    /// Creates a new DocAddress from the segment/docId pair.
    pub fn new(segment_ord: SegmentOrdinal, doc_id: DocId) -> DocAddress {
        DocAddress {
            segment_ord,
            doc_id,
        }
    }
}

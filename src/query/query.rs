use std::fmt;
use std::hash::{Hash, Hasher};

use downcast_rs::impl_downcast;

use super::{DynEq, Weight};
use crate::core::searcher::Searcher;
use crate::query::Explanation;
use crate::DocAddress;

/// Argument used in `Query::weight(..)`
#[derive(Copy, Clone)]
pub enum EnableScoring<'a> {
    /// Pass this to enable scoring.
    Enabled {
        /// The searcher to use during scoring.
        searcher: &'a Searcher,
    },
    /// Pass this to disable scoring.
    /// This can improve performance.
    Disabled {
        /// Searcher should be provided if available.
        searcher_opt: Option<&'a Searcher>,
    },
}

impl<'a> EnableScoring<'a> {
    /// Create using [`Searcher`] with scoring enabled.
    pub fn enabled_from_searcher(searcher: &'a Searcher) -> EnableScoring<'a> {
        EnableScoring::Enabled { searcher }
    }

    /// Create using [`Searcher`] with scoring disabled.
    pub fn disabled_from_searcher(searcher: &'a Searcher) -> EnableScoring<'a> {
        EnableScoring::Disabled {
            searcher_opt: Some(searcher),
        }
    }

    /// Scoring disabled, without any searcher.
    ///
    /// This is what filters use to resolve their matching documents segment by segment.
    pub fn disabled() -> EnableScoring<'static> {
        EnableScoring::Disabled { searcher_opt: None }
    }

    /// Returns the searcher if available.
    pub fn searcher(&self) -> Option<&Searcher> {
        match self {
            EnableScoring::Enabled { searcher } => Some(*searcher),
            EnableScoring::Disabled { searcher_opt } => *searcher_opt,
        }
    }

    /// Returns true if the scoring is enabled.
    pub fn is_scoring_enabled(&self) -> bool {
        matches!(self, EnableScoring::Enabled { .. })
    }
}

/// The `Query` trait defines a set of documents and a scoring method
/// for those documents.
///
/// The `Query` trait is in charge of defining :
///
/// - a set of documents
/// - a way to score these documents
///
/// Concretely, this scored docset is represented by the
/// [`Scorer`](crate::query::Scorer) trait.
///
/// Because our index is actually split into segments, the
/// query does not actually directly creates [`DocSet`](crate::DocSet) object.
/// Instead, the query creates a [`Weight`] object for a given searcher.
///
/// The weight object, in turn, makes it possible to create
/// a scorer for a specific [`SegmentReader`](crate::SegmentReader).
///
/// So to sum it up :
/// - a `Query` is a recipe to define a set of documents as well the way to score them.
/// - a [`Weight`] is this recipe tied to a specific [`Searcher`]. It is created by the query.
/// - a [`Scorer`](crate::query::Scorer) is a cursor over the set of matching documents, for a
///   specific [`SegmentReader`](crate::SegmentReader). It is created by the [`Weight`].
///
/// Queries are compared and hashed structurally: a `Query` implementation is expected to
/// be `PartialEq + Hash`, which gives it [`DynEq`] for free. Two boxed queries are equal iff
/// they have the same concrete type and are equal as values of this type.
pub trait Query: QueryClone + DynEq + Send + Sync + downcast_rs::Downcast + fmt::Debug {
    /// Create the weight associated with a query.
    ///
    /// If scoring is not required, setting `scoring_enabled` to `false`
    /// can increase performances.
    ///
    /// See [`Weight`].
    fn weight(&self, enable_scoring: EnableScoring<'_>) -> crate::Result<Box<dyn Weight>>;

    /// Returns an `Explanation` for the score of the document.
    fn explain(&self, searcher: &Searcher, doc_address: DocAddress) -> crate::Result<Explanation> {
        let weight = self.weight(EnableScoring::enabled_from_searcher(searcher))?;
        let reader = searcher.get_segment_reader(doc_address.segment_ord)?;
        weight.explain(reader, doc_address.doc_id)
    }

    /// Returns the number of documents matching the query.
    fn count(&self, searcher: &Searcher) -> crate::Result<usize> {
        let weight = self.weight(EnableScoring::disabled_from_searcher(searcher))?;
        let mut result = 0;
        for reader in searcher.segment_readers() {
            result += weight.count(reader)? as usize;
        }
        Ok(result)
    }
}

/// Implements `box_clone`.
pub trait QueryClone {
    /// Returns a boxed clone of `self`.
    fn box_clone(&self) -> Box<dyn Query>;
}

impl<T> QueryClone for T
where T: 'static + Query + Clone
{
    fn box_clone(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Query> {
    fn clone(&self) -> Self {
        self.as_ref().box_clone()
    }
}

impl PartialEq for Box<dyn Query> {
    fn eq(&self, other: &Box<dyn Query>) -> bool {
        self.as_ref().dyn_eq(other.as_ref().as_any())
    }
}

impl Eq for Box<dyn Query> {}

impl Hash for Box<dyn Query> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_ref().dyn_hash(state);
    }
}

impl_downcast!(Query);

//! Module containing all of the queries and the query-related objects
//! (weights, scorers, explanations).

mod all_query;
mod boost_query;
mod const_score_query;
mod doc_id_set_query;
mod dyn_eq;
mod empty_query;
pub(crate) mod explanation;
mod function_score;
mod query;
mod scorer;
mod vec_docset;
mod weight;

pub use self::all_query::{AllQuery, AllScorer, AllWeight};
pub use self::boost_query::{BoostQuery, BoostWeight};
pub use self::const_score_query::{ConstScoreQuery, ConstScorer};
pub use self::doc_id_set_query::DocIdSetQuery;
pub use self::dyn_eq::DynEq;
pub use self::empty_query::{EmptyQuery, EmptyScorer, EmptyWeight};
pub use self::explanation::Explanation;
pub use self::function_score::{
    aggregate_scores, BoostFactorFunction, Filter, FilterFunction, FiltersFunctionScoreQuery,
    FiltersFunctionScoreQueryBuilder, Membership, QueryFilter, ScoreAggregator, ScoreFunction,
    ScoreMode, ScriptFunction, SegmentScoreFunction,
};
pub use self::query::{EnableScoring, Query, QueryClone};
pub use self::scorer::Scorer;
pub use self::vec_docset::VecDocSet;
pub use self::weight::Weight;

//! Filter/function scoring.
//!
//! A [`FiltersFunctionScoreQuery`] rescores the documents of a sub query with the
//! functions of the [`Filter`]s they belong to.

mod filter;
mod filter_function;
mod filters_function_score_query;
mod score_aggregator;
mod score_function;
mod score_mode;

pub use self::filter::{Filter, Membership, QueryFilter};
pub use self::filter_function::FilterFunction;
pub use self::filters_function_score_query::{
    FiltersFunctionScoreQuery, FiltersFunctionScoreQueryBuilder,
};
pub use self::score_aggregator::{aggregate_scores, ScoreAggregator};
pub use self::score_function::{
    BoostFactorFunction, ScoreFunction, ScriptFunction, SegmentScoreFunction,
};
pub use self::score_mode::ScoreMode;

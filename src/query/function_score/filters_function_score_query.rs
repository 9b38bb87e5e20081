use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::{
    Filter, FilterFunction, Membership, ScoreAggregator, ScoreFunction, ScoreMode,
    SegmentScoreFunction,
};
use crate::query::explanation::doc_out_of_range;
use crate::query::{EnableScoring, Explanation, Query, Scorer, Weight};
use crate::{DocId, DocSet, FunctionScoreError, Score, SegmentReader};

/// Modifies the score of the documents matched by a sub query, depending on the
/// filters they belong to.
///
/// The query holds an ordered list of [`FilterFunction`] bindings. For every
/// document matched by the sub query, the function of every binding whose filter
/// contains the document is evaluated, and the outputs are combined according to
/// the [`ScoreMode`]. A document that belongs to none of the filters keeps the
/// score of the sub query.
///
/// In both cases, the result is multiplied by the boost of the query.
///
/// The set of documents matched is strictly the one of the sub query.
#[derive(Clone)]
pub struct FiltersFunctionScoreQuery {
    query: Box<dyn Query>,
    filter_functions: Arc<[FilterFunction]>,
    score_mode: ScoreMode,
    boost: Score,
}

impl FiltersFunctionScoreQuery {
    /// Creates a new query with a boost of `1.0`.
    pub fn new(
        query: Box<dyn Query>,
        score_mode: ScoreMode,
        filter_functions: Vec<FilterFunction>,
    ) -> FiltersFunctionScoreQuery {
        FiltersFunctionScoreQuery {
            query,
            filter_functions: filter_functions.into(),
            score_mode,
            boost: 1.0,
        }
    }

    /// Starts building a query on top of `query`.
    pub fn builder(query: Box<dyn Query>) -> FiltersFunctionScoreQueryBuilder {
        FiltersFunctionScoreQueryBuilder {
            query,
            filter_functions: Vec::new(),
            score_mode: ScoreMode::default(),
            boost: 1.0,
        }
    }

    /// Sets the boost of the query.
    pub fn with_boost(mut self, boost: Score) -> FiltersFunctionScoreQuery {
        self.boost = boost;
        self
    }

    /// Returns the sub query.
    pub fn query(&self) -> &dyn Query {
        self.query.as_ref()
    }

    /// Returns the bindings, in declaration order.
    pub fn filter_functions(&self) -> &[FilterFunction] {
        &self.filter_functions
    }

    /// Returns the score mode.
    pub fn score_mode(&self) -> ScoreMode {
        self.score_mode
    }

    /// Returns the boost of the query.
    pub fn boost(&self) -> Score {
        self.boost
    }
}

impl PartialEq for FiltersFunctionScoreQuery {
    fn eq(&self, other: &FiltersFunctionScoreQuery) -> bool {
        self.score_mode == other.score_mode
            && self.boost.to_bits() == other.boost.to_bits()
            && self.query.eq(&other.query)
            && self.filter_functions.eq(&other.filter_functions)
    }
}

impl Eq for FiltersFunctionScoreQuery {}

impl Hash for FiltersFunctionScoreQuery {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.query.hash(state);
        self.filter_functions.hash(state);
        self.score_mode.hash(state);
        self.boost.to_bits().hash(state);
    }
}

impl fmt::Debug for FiltersFunctionScoreQuery {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "FiltersFunctionScore(query={:?}, functions={:?}, score_mode={}, boost={})",
            self.query, self.filter_functions, self.score_mode, self.boost
        )
    }
}

impl Query for FiltersFunctionScoreQuery {
    fn weight(&self, enable_scoring: EnableScoring<'_>) -> crate::Result<Box<dyn Weight>> {
        let sub_weight = self.query.weight(enable_scoring)?;
        if !enable_scoring.is_scoring_enabled() {
            return Ok(sub_weight);
        }
        Ok(Box::new(FiltersFunctionScoreWeight {
            sub_weight,
            filter_functions: self.filter_functions.clone(),
            score_mode: self.score_mode,
            boost: self.boost,
        }))
    }
}

/// Builder for [`FiltersFunctionScoreQuery`].
///
/// ```rust
/// use std::sync::Arc;
///
/// use tantivy_function_score::query::{
///     AllQuery, BoostFactorFunction, EmptyQuery, FiltersFunctionScoreQuery, QueryFilter, ScoreMode,
/// };
///
/// # fn main() -> tantivy_function_score::Result<()> {
/// let query = FiltersFunctionScoreQuery::builder(Box::new(AllQuery))
///     .score_mode_str("avg")?
///     .boost(2.0)
///     .add(Arc::new(QueryFilter::new(AllQuery)), Arc::new(BoostFactorFunction::new(3.0)))
///     .build()?;
/// assert_eq!(query.score_mode(), ScoreMode::Avg);
/// assert_eq!(query.filter_functions().len(), 1);
///
/// assert!(FiltersFunctionScoreQuery::builder(Box::new(EmptyQuery)).build().is_err());
/// assert!(FiltersFunctionScoreQuery::builder(Box::new(EmptyQuery))
///     .score_mode_str("sum")
///     .is_err());
/// # Ok(())
/// # }
/// ```
pub struct FiltersFunctionScoreQueryBuilder {
    query: Box<dyn Query>,
    filter_functions: Vec<FilterFunction>,
    score_mode: ScoreMode,
    boost: Score,
}

impl FiltersFunctionScoreQueryBuilder {
    /// Sets the score mode. Defaults to [`ScoreMode::First`].
    pub fn score_mode(mut self, score_mode: ScoreMode) -> Self {
        self.score_mode = score_mode;
        self
    }

    /// Sets the score mode from its lowercase token, e.g. `"multiply"`.
    pub fn score_mode_str(self, score_mode_str: &str) -> crate::Result<Self> {
        let score_mode = score_mode_str.parse()?;
        Ok(self.score_mode(score_mode))
    }

    /// Sets the boost of the query. Defaults to `1.0`.
    pub fn boost(mut self, boost: Score) -> Self {
        self.boost = boost;
        self
    }

    /// Appends a binding.
    pub fn add(mut self, filter: Arc<dyn Filter>, function: Arc<dyn ScoreFunction>) -> Self {
        self.filter_functions.push(FilterFunction::new(filter, function));
        self
    }

    /// Appends an already built binding.
    pub fn add_filter_function(mut self, filter_function: FilterFunction) -> Self {
        self.filter_functions.push(filter_function);
        self
    }

    /// Builds the query.
    ///
    /// Returns an error if no binding was added.
    pub fn build(self) -> crate::Result<FiltersFunctionScoreQuery> {
        if self.filter_functions.is_empty() {
            return Err(FunctionScoreError::InvalidArgument(
                "A filters function score query requires at least one filter function".to_string(),
            ));
        }
        Ok(
            FiltersFunctionScoreQuery::new(self.query, self.score_mode, self.filter_functions)
                .with_boost(self.boost),
        )
    }
}

struct FiltersFunctionScoreWeight {
    sub_weight: Box<dyn Weight>,
    filter_functions: Arc<[FilterFunction]>,
    score_mode: ScoreMode,
    boost: Score,
}

impl FiltersFunctionScoreWeight {
    fn explain_filter_function(
        &self,
        filter_function: &FilterFunction,
        reader: &SegmentReader,
        doc: DocId,
        sub_query_explanation: &Explanation,
    ) -> crate::Result<Option<Explanation>> {
        let membership = filter_function.filter().membership(reader)?;
        if !membership.contains(doc) {
            return Ok(None);
        }
        let mut function = filter_function.function().segment_function(reader)?;
        let function_explanation = function.explain(doc, sub_query_explanation)?;
        let mut explanation =
            Explanation::new("function score, product of:", function_explanation.value());
        explanation.add_const(
            format!("match filter: {:?}", filter_function.filter()),
            1.0,
        );
        explanation.add_detail(function_explanation);
        explanation.add_const("queryBoost", self.boost);
        Ok(Some(explanation))
    }
}

impl Weight for FiltersFunctionScoreWeight {
    fn scorer(&self, reader: &SegmentReader, boost: Score) -> crate::Result<Box<dyn Scorer>> {
        let sub_scorer = self.sub_weight.scorer(reader, 1.0)?;
        debug!(
            "function score scorer on segment #{}: {} filter functions, score mode [{}]",
            reader.segment_ord(),
            self.filter_functions.len(),
            self.score_mode
        );
        Ok(Box::new(FiltersFunctionScorer {
            sub_scorer,
            cache: FilterFunctionCache::new(reader.clone(), self.filter_functions.clone()),
            aggregator: ScoreAggregator::new(self.score_mode),
            boost: boost * self.boost,
        }))
    }

    fn explain(&self, reader: &SegmentReader, doc: DocId) -> crate::Result<Explanation> {
        if doc >= reader.max_doc() {
            return Err(doc_out_of_range(doc, reader.max_doc()));
        }
        let sub_query_explanation = self.sub_weight.explain(reader, doc)?;
        if !sub_query_explanation.is_match() {
            return Ok(sub_query_explanation);
        }
        let mut aggregator = ScoreAggregator::new(self.score_mode);
        let mut filter_explanations = Vec::new();
        for filter_function in self.filter_functions.iter() {
            let Some(filter_explanation) =
                self.explain_filter_function(filter_function, reader, doc, &sub_query_explanation)?
            else {
                continue;
            };
            aggregator.update(filter_explanation.value());
            filter_explanations.push(filter_explanation);
            if aggregator.is_saturated() {
                break;
            }
        }
        let Some(combined_score) = aggregator.score() else {
            let mut explanation = Explanation::new(
                "function score, no filter match, product of:",
                self.boost * sub_query_explanation.value(),
            );
            explanation.add_detail(sub_query_explanation);
            explanation.add_const("queryBoost", self.boost);
            return Ok(explanation);
        };
        let mut explanation = Explanation::new(
            format!("function score, score mode [{}]", self.score_mode),
            self.boost * combined_score,
        );
        for filter_explanation in filter_explanations {
            explanation.add_detail(filter_explanation);
        }
        Ok(explanation)
    }

    fn count(&self, reader: &SegmentReader) -> crate::Result<u32> {
        self.sub_weight.count(reader)
    }
}

/// Segment-bound state of the bindings, filled on first use.
///
/// Memberships and segment functions are only resolved for the bindings that
/// actually get visited. They are never invalidated: the cache lives as long as
/// the scorer of its segment.
struct FilterFunctionCache {
    reader: SegmentReader,
    filter_functions: Arc<[FilterFunction]>,
    memberships: Vec<Option<Box<dyn Membership>>>,
    functions: Vec<Option<Box<dyn SegmentScoreFunction>>>,
}

impl FilterFunctionCache {
    fn new(reader: SegmentReader, filter_functions: Arc<[FilterFunction]>) -> FilterFunctionCache {
        let num_filter_functions = filter_functions.len();
        FilterFunctionCache {
            reader,
            filter_functions,
            memberships: std::iter::repeat_with(|| None)
                .take(num_filter_functions)
                .collect(),
            functions: std::iter::repeat_with(|| None)
                .take(num_filter_functions)
                .collect(),
        }
    }

    fn len(&self) -> usize {
        self.filter_functions.len()
    }

    fn membership(&mut self, ord: usize) -> crate::Result<&dyn Membership> {
        let membership = match &mut self.memberships[ord] {
            Some(membership) => membership,
            slot => slot.insert(self.filter_functions[ord].filter().membership(&self.reader)?),
        };
        Ok(&**membership)
    }

    fn function(&mut self, ord: usize) -> crate::Result<&mut dyn SegmentScoreFunction> {
        let function = match &mut self.functions[ord] {
            Some(function) => function,
            slot => slot.insert(
                self.filter_functions[ord]
                    .function()
                    .segment_function(&self.reader)?,
            ),
        };
        Ok(&mut **function)
    }
}

struct FiltersFunctionScorer {
    sub_scorer: Box<dyn Scorer>,
    cache: FilterFunctionCache,
    aggregator: ScoreAggregator,
    boost: Score,
}

impl DocSet for FiltersFunctionScorer {
    fn advance(&mut self) -> DocId {
        self.sub_scorer.advance()
    }

    fn seek(&mut self, target: DocId) -> DocId {
        self.sub_scorer.seek(target)
    }

    fn doc(&self) -> DocId {
        self.sub_scorer.doc()
    }

    fn size_hint(&self) -> u32 {
        self.sub_scorer.size_hint()
    }
}

impl Scorer for FiltersFunctionScorer {
    fn score(&mut self) -> crate::Result<Score> {
        let doc = self.doc();
        let sub_query_score = self.sub_scorer.score()?;
        self.aggregator.clear();
        for ord in 0..self.cache.len() {
            if !self.cache.membership(ord)?.contains(doc) {
                continue;
            }
            let contribution = self.cache.function(ord)?.score(doc, sub_query_score)?;
            self.aggregator.update(contribution);
            if self.aggregator.is_saturated() {
                break;
            }
        }
        Ok(self.boost * self.aggregator.score().unwrap_or(sub_query_score))
    }
}

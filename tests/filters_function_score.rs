use std::collections::HashMap;
use std::sync::Arc;

use maplit::hashmap;
use tantivy_function_score::query::{
    AllQuery, BoostFactorFunction, BoostQuery, DocIdSetQuery, Filter, FiltersFunctionScoreQuery,
    QueryFilter, ScoreFunction, ScoreMode, ScriptFunction,
};
use tantivy_function_score::{
    DocAddress, Executor, FunctionScoreError, Score, Searcher, SegmentReader,
};

/// The four documents of the scenario, by name.
///
/// D1 and D3 are red, and each document carries one of `value1`..`value4`.
struct Corpus {
    searcher: Searcher,
    addresses: HashMap<&'static str, DocAddress>,
}

impl Corpus {
    /// All documents in a single segment.
    fn single_segment() -> Corpus {
        Corpus {
            searcher: Searcher::new(vec![SegmentReader::new(0, 4)]),
            addresses: hashmap! {
                "D1" => DocAddress::new(0, 0),
                "D2" => DocAddress::new(0, 1),
                "D3" => DocAddress::new(0, 2),
                "D4" => DocAddress::new(0, 3),
            },
        }
    }

    /// Documents spread over two segments.
    fn two_segments() -> Corpus {
        Corpus {
            searcher: Searcher::new(vec![SegmentReader::new(0, 2), SegmentReader::new(1, 3)]),
            addresses: hashmap! {
                "D1" => DocAddress::new(1, 2),
                "D2" => DocAddress::new(0, 0),
                "D3" => DocAddress::new(1, 0),
                "D4" => DocAddress::new(0, 1),
            },
        }
    }

    fn filter(&self, names: &[&str]) -> Arc<dyn Filter> {
        let doc_addresses = names.iter().map(|name| self.addresses[name]);
        Arc::new(QueryFilter::new(DocIdSetQuery::new(doc_addresses)))
    }

    fn query(&self) -> DocIdSetQuery {
        DocIdSetQuery::new(self.addresses.values().copied())
    }

    fn colors_and_values(&self, score_mode: ScoreMode) -> FiltersFunctionScoreQuery {
        FiltersFunctionScoreQuery::builder(Box::new(self.query()))
            .score_mode(score_mode)
            .add(self.filter(&["D4"]), boost_factor(2.0))
            .add(self.filter(&["D1"]), boost_factor(3.0))
            .add(self.filter(&["D1", "D3"]), boost_factor(5.0))
            .build()
            .unwrap()
    }

    fn scores(
        &self,
        query: &FiltersFunctionScoreQuery,
        executor: &Executor,
    ) -> tantivy_function_score::Result<HashMap<&'static str, Score>> {
        let hits = self.searcher.search_with_executor(query, executor)?;
        let names: HashMap<DocAddress, &'static str> = self
            .addresses
            .iter()
            .map(|(&name, &doc_address)| (doc_address, name))
            .collect();
        Ok(hits
            .into_iter()
            .map(|(score, doc_address)| (names[&doc_address], score))
            .collect())
    }

    fn assert_explanations_match_scores(&self, query: &FiltersFunctionScoreQuery) {
        for (score, doc_address) in self.searcher.search(query).unwrap() {
            let explanation = self.searcher.explain(query, doc_address).unwrap();
            assert_eq!(explanation.value(), score, "{}", explanation.to_pretty_json());
        }
    }
}

fn boost_factor(boost: Score) -> Arc<dyn ScoreFunction> {
    Arc::new(BoostFactorFunction::new(boost))
}

#[test]
fn test_score_modes() {
    let expected_scores_by_mode = hashmap! {
        ScoreMode::First => hashmap! { "D1" => 3.0, "D2" => 1.0, "D3" => 5.0, "D4" => 2.0 },
        ScoreMode::Total => hashmap! { "D1" => 8.0, "D2" => 1.0, "D3" => 5.0, "D4" => 2.0 },
        ScoreMode::Max => hashmap! { "D1" => 5.0, "D2" => 1.0, "D3" => 5.0, "D4" => 2.0 },
        ScoreMode::Avg => hashmap! { "D1" => 4.0, "D2" => 1.0, "D3" => 5.0, "D4" => 2.0 },
        ScoreMode::Min => hashmap! { "D1" => 3.0, "D2" => 1.0, "D3" => 5.0, "D4" => 2.0 },
        ScoreMode::Multiply => hashmap! { "D1" => 15.0, "D2" => 1.0, "D3" => 5.0, "D4" => 2.0 },
    };
    let corpus = Corpus::single_segment();
    for (score_mode, expected_scores) in expected_scores_by_mode {
        let query = corpus.colors_and_values(score_mode);
        let scores = corpus.scores(&query, &Executor::single_thread()).unwrap();
        assert_eq!(scores, expected_scores, "score mode [{score_mode}]");
        corpus.assert_explanations_match_scores(&query);
    }
}

#[test]
fn test_score_modes_multi_segment_multi_thread() -> tantivy_function_score::Result<()> {
    let single_segment = Corpus::single_segment();
    let two_segments = Corpus::two_segments();
    let executor = Executor::multi_thread(2, "function-score-test-")?;
    for score_mode in ScoreMode::ALL {
        let expected_scores = single_segment.scores(
            &single_segment.colors_and_values(score_mode),
            &Executor::single_thread(),
        )?;
        let query = two_segments.colors_and_values(score_mode);
        assert_eq!(two_segments.scores(&query, &executor)?, expected_scores);
        two_segments.assert_explanations_match_scores(&query);
    }
    Ok(())
}

#[test]
fn test_script_functions() -> tantivy_function_score::Result<()> {
    let corpus = Corpus::single_segment();
    let query = FiltersFunctionScoreQuery::builder(Box::new(AllQuery))
        .score_mode_str("first")?
        .add(
            corpus.filter(&["D4"]),
            Arc::new(ScriptFunction::new("_score * 2", |_, _, score| Ok(score * 2.0))),
        )
        .add(
            corpus.filter(&["D2"]),
            Arc::new(ScriptFunction::new("_score * 3", |_, _, score| Ok(score * 3.0))),
        )
        .build()?;
    let scores = corpus.scores(&query, &Executor::single_thread())?;
    assert_eq!(
        scores,
        hashmap! { "D1" => 1.0, "D2" => 3.0, "D3" => 1.0, "D4" => 2.0 }
    );
    let explanation = corpus.searcher.explain(&query, corpus.addresses["D2"])?;
    assert_eq!(explanation.value(), 3.0);
    let function_explanation = &explanation.details()[0].details()[1];
    assert_eq!(function_explanation.description(), "script score function: _score * 3");
    assert_eq!(function_explanation.details()[0].description(), "AllQuery");
    Ok(())
}

#[test]
fn test_script_reading_fast_field() -> tantivy_function_score::Result<()> {
    let searcher = Searcher::new(vec![
        SegmentReader::new(0, 2).with_fast_field("num1", vec![1.0, 2.0])?,
        SegmentReader::new(1, 2).with_fast_field("num1", vec![3.0, 4.0])?,
    ]);
    let odd_docs = QueryFilter::new(DocIdSetQuery::new(vec![
        DocAddress::new(0, 1),
        DocAddress::new(1, 1),
    ]));
    let query = FiltersFunctionScoreQuery::builder(Box::new(AllQuery))
        .score_mode(ScoreMode::Total)
        .add(
            Arc::new(odd_docs),
            Arc::new(ScriptFunction::new("doc['num1'].value", |reader, doc, _score| {
                let num1 = reader.fast_field_f64("num1")?;
                Ok(num1[doc as usize] as Score)
            })),
        )
        .add(
            Arc::new(QueryFilter::new(AllQuery)),
            boost_factor(0.5),
        )
        .build()?;
    assert_eq!(
        searcher.search(&query)?,
        vec![
            (0.5, DocAddress::new(0, 0)),
            (2.5, DocAddress::new(0, 1)),
            (0.5, DocAddress::new(1, 0)),
            (4.5, DocAddress::new(1, 1)),
        ]
    );
    Ok(())
}

#[test]
fn test_function_error_aborts_multi_thread_search() -> tantivy_function_score::Result<()> {
    let searcher = Searcher::new(vec![
        SegmentReader::new(0, 3).with_fast_field("price", vec![1.0, 2.0, 3.0])?,
        SegmentReader::new(1, 3),
    ]);
    let query = FiltersFunctionScoreQuery::builder(Box::new(AllQuery))
        .add(
            Arc::new(QueryFilter::new(AllQuery)),
            Arc::new(ScriptFunction::new("doc['price'].value", |reader, doc, _score| {
                let price = reader.fast_field_f64("price")?;
                Ok(price[doc as usize] as Score)
            })),
        )
        .build()?;
    let executor = Executor::multi_thread(2, "function-score-test-")?;
    assert!(matches!(
        searcher.search_with_executor(&query, &executor),
        Err(FunctionScoreError::SchemaError(_))
    ));
    assert_eq!(searcher.explain(&query, DocAddress::new(0, 2))?.value(), 3.0);
    Ok(())
}

#[test]
fn test_boost_linearity() -> tantivy_function_score::Result<()> {
    let corpus = Corpus::single_segment();
    for score_mode in ScoreMode::ALL {
        let query = corpus.colors_and_values(score_mode);
        let scores = corpus.scores(&query, &Executor::single_thread())?;
        let boosted_query = query.clone().with_boost(4.0);
        let boosted_scores = corpus.scores(&boosted_query, &Executor::single_thread())?;
        for (name, score) in &scores {
            assert_eq!(boosted_scores[name], 4.0 * score);
        }
        corpus.assert_explanations_match_scores(&boosted_query);

        let wrapped = BoostQuery::new(Box::new(query), 4.0);
        let wrapped_hits = corpus.searcher.search(&wrapped)?;
        for (score, doc_address) in wrapped_hits {
            assert_eq!(corpus.searcher.explain(&wrapped, doc_address)?.value(), score);
        }
    }
    Ok(())
}

#[test]
fn test_score_mode_from_json() {
    let score_mode: ScoreMode = serde_json::from_str(r#""multiply""#).unwrap();
    assert_eq!(score_mode, ScoreMode::Multiply);
    assert!(matches!(
        "median".parse::<ScoreMode>(),
        Err(FunctionScoreError::UnknownScoreMode(_))
    ));
}

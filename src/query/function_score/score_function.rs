use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use downcast_rs::impl_downcast;

use crate::query::{DynEq, Explanation};
use crate::{DocId, Score, SegmentReader};

/// A function computing the contribution of a matching filter to the score of
/// a document.
///
/// A `ScoreFunction` is bound to a segment through
/// [`ScoreFunction::segment_function`] before being evaluated. Like filters,
/// score functions are compared and hashed structurally.
pub trait ScoreFunction: DynEq + Send + Sync + downcast_rs::Downcast + fmt::Debug {
    /// Binds the function to a segment.
    fn segment_function(
        &self,
        reader: &SegmentReader,
    ) -> crate::Result<Box<dyn SegmentScoreFunction>>;
}

impl_downcast!(ScoreFunction);

impl PartialEq for dyn ScoreFunction {
    fn eq(&self, other: &dyn ScoreFunction) -> bool {
        self.dyn_eq(other.as_any())
    }
}

impl Eq for dyn ScoreFunction {}

impl Hash for dyn ScoreFunction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dyn_hash(state);
    }
}

/// A [`ScoreFunction`] bound to a segment.
pub trait SegmentScoreFunction: Send {
    /// Computes the contribution for `doc`, given the score of the sub query.
    fn score(&mut self, doc: DocId, sub_query_score: Score) -> crate::Result<Score>;

    /// Explains the contribution for `doc`.
    ///
    /// The value of the returned explanation must be equal to what
    /// [`SegmentScoreFunction::score`] returns for the same document, with
    /// `sub_query_explanation.value()` as the sub query score.
    fn explain(
        &mut self,
        doc: DocId,
        sub_query_explanation: &Explanation,
    ) -> crate::Result<Explanation>;
}

/// Contributes a constant, whatever the document.
#[derive(Clone, Copy, Debug)]
pub struct BoostFactorFunction {
    boost: Score,
}

impl BoostFactorFunction {
    /// Creates a function contributing `boost` to every document.
    pub fn new(boost: Score) -> BoostFactorFunction {
        BoostFactorFunction { boost }
    }

    /// Returns the constant contribution.
    pub fn boost(&self) -> Score {
        self.boost
    }
}

impl PartialEq for BoostFactorFunction {
    fn eq(&self, other: &BoostFactorFunction) -> bool {
        self.boost.to_bits() == other.boost.to_bits()
    }
}

impl Eq for BoostFactorFunction {}

impl Hash for BoostFactorFunction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.boost.to_bits().hash(state);
    }
}

impl ScoreFunction for BoostFactorFunction {
    fn segment_function(
        &self,
        _reader: &SegmentReader,
    ) -> crate::Result<Box<dyn SegmentScoreFunction>> {
        Ok(Box::new(*self))
    }
}

impl SegmentScoreFunction for BoostFactorFunction {
    fn score(&mut self, _doc: DocId, _sub_query_score: Score) -> crate::Result<Score> {
        Ok(self.boost)
    }

    fn explain(
        &mut self,
        _doc: DocId,
        _sub_query_explanation: &Explanation,
    ) -> crate::Result<Explanation> {
        Ok(Explanation::new("boostFactor", self.boost))
    }
}

type Script = Arc<dyn Fn(&SegmentReader, DocId, Score) -> crate::Result<Score> + Send + Sync>;

/// A named closure computing the contribution of a document.
///
/// The closure receives the segment reader (giving access to fast fields), the
/// doc id and the score of the sub query. Two script functions are equal iff
/// they have the same name.
///
/// ```rust
/// use tantivy_function_score::query::ScriptFunction;
///
/// let double = ScriptFunction::new("_score * 2", |_reader, _doc, score| Ok(score * 2.0));
/// assert_eq!(double.name(), "_score * 2");
/// ```
#[derive(Clone)]
pub struct ScriptFunction {
    name: String,
    script: Script,
}

impl ScriptFunction {
    /// Creates a new script function.
    pub fn new<F>(name: impl Into<String>, script: F) -> ScriptFunction
    where F: Fn(&SegmentReader, DocId, Score) -> crate::Result<Score> + Send + Sync + 'static {
        ScriptFunction {
            name: name.into(),
            script: Arc::new(script),
        }
    }

    /// Returns the name of the script.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for ScriptFunction {
    fn eq(&self, other: &ScriptFunction) -> bool {
        self.name == other.name
    }
}

impl Eq for ScriptFunction {}

impl Hash for ScriptFunction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for ScriptFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScriptFunction({})", self.name)
    }
}

impl ScoreFunction for ScriptFunction {
    fn segment_function(
        &self,
        reader: &SegmentReader,
    ) -> crate::Result<Box<dyn SegmentScoreFunction>> {
        Ok(Box::new(SegmentScript {
            name: self.name.clone(),
            script: self.script.clone(),
            reader: reader.clone(),
        }))
    }
}

struct SegmentScript {
    name: String,
    script: Script,
    reader: SegmentReader,
}

impl SegmentScoreFunction for SegmentScript {
    fn score(&mut self, doc: DocId, sub_query_score: Score) -> crate::Result<Score> {
        (self.script)(&self.reader, doc, sub_query_score)
    }

    fn explain(
        &mut self,
        doc: DocId,
        sub_query_explanation: &Explanation,
    ) -> crate::Result<Explanation> {
        let score = self.score(doc, sub_query_explanation.value())?;
        let mut explanation =
            Explanation::new(format!("script score function: {}", self.name), score);
        explanation.add_detail(sub_query_explanation.clone());
        Ok(explanation)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use std::sync::Arc;

    use super::{BoostFactorFunction, ScoreFunction, ScriptFunction};
    use crate::query::Explanation;
    use crate::{FunctionScoreError, SegmentReader};

    fn hash_of(function: &dyn ScoreFunction) -> u64 {
        let mut hasher = DefaultHasher::new();
        function.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_boost_factor_function() -> crate::Result<()> {
        let reader = SegmentReader::new(0, 2);
        let mut function = BoostFactorFunction::new(3.0).segment_function(&reader)?;
        assert_eq!(function.score(0, 0.5)?, 3.0);
        assert_eq!(function.score(1, 7.0)?, 3.0);
        let explanation = function.explain(1, &Explanation::new("AllQuery", 7.0))?;
        assert_eq!(explanation.value(), 3.0);
        assert_eq!(explanation.description(), "boostFactor");
        Ok(())
    }

    #[test]
    fn test_script_function_reads_fast_field() -> crate::Result<()> {
        let reader = SegmentReader::new(0, 3).with_fast_field("num1", vec![1.0, 2.0, 3.0])?;
        let script = ScriptFunction::new("doc['num1'] * _score", |reader, doc, score| {
            let num1 = reader.fast_field_f64("num1")?;
            Ok(num1[doc as usize] as f32 * score)
        });
        let mut function = script.segment_function(&reader)?;
        assert_eq!(function.score(2, 0.5)?, 1.5);
        let sub_query_explanation = Explanation::new("AllQuery", 0.5);
        let explanation = function.explain(2, &sub_query_explanation)?;
        assert_eq!(explanation.value(), 1.5);
        assert_eq!(
            explanation.description(),
            "script score function: doc['num1'] * _score"
        );
        assert_eq!(explanation.details(), &[sub_query_explanation]);
        Ok(())
    }

    #[test]
    fn test_script_function_error() -> crate::Result<()> {
        let reader = SegmentReader::new(0, 1);
        let script = ScriptFunction::new("doc['missing']", |reader, _doc, _score| {
            reader.fast_field_f64("missing")?;
            Ok(0.0)
        });
        let mut function = script.segment_function(&reader)?;
        assert!(matches!(
            function.score(0, 1.0),
            Err(FunctionScoreError::SchemaError(_))
        ));
        assert!(function.explain(0, &Explanation::new("AllQuery", 1.0)).is_err());
        Ok(())
    }

    #[test]
    fn test_score_function_equality() {
        let two: Arc<dyn ScoreFunction> = Arc::new(BoostFactorFunction::new(2.0));
        let other_two: Arc<dyn ScoreFunction> = Arc::new(BoostFactorFunction::new(2.0));
        let three: Arc<dyn ScoreFunction> = Arc::new(BoostFactorFunction::new(3.0));
        assert!((*two).eq(&*other_two));
        assert!(!(*two).eq(&*three));
        assert_eq!(hash_of(two.as_ref()), hash_of(other_two.as_ref()));

        let script: Arc<dyn ScoreFunction> =
            Arc::new(ScriptFunction::new("_score", |_, _, score| Ok(score)));
        let same_name: Arc<dyn ScoreFunction> =
            Arc::new(ScriptFunction::new("_score", |_, _, _| Ok(0.0)));
        assert!((*script).eq(&*same_name));
        assert!(!(*script).eq(&*two));
    }
}

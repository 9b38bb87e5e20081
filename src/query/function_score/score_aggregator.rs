use super::ScoreMode;
use crate::Score;

/// Combines the outputs of the functions of the filters matching a document.
///
/// The aggregator is fed, in declaration order, with the output of the function of
/// every matching filter. Both the scorer and the explanation go through it, which is
/// what keeps their values identical.
///
/// In [`ScoreMode::First`], the aggregator is saturated as soon as it received one
/// contribution and the caller is expected to stop evaluating functions.
///
/// A NaN contribution turns the result of every mode but `First` into NaN.
#[derive(Clone, Copy, Debug)]
pub struct ScoreAggregator {
    score_mode: ScoreMode,
    count: u32,
    first: Score,
    total: Score,
    product: Score,
    max: Score,
    min: Score,
}

impl ScoreAggregator {
    /// Creates an empty aggregator.
    pub fn new(score_mode: ScoreMode) -> ScoreAggregator {
        ScoreAggregator {
            score_mode,
            count: 0,
            first: 0.0,
            total: 0.0,
            product: 1.0,
            max: Score::NEG_INFINITY,
            min: Score::INFINITY,
        }
    }

    /// Returns the score mode.
    pub fn score_mode(&self) -> ScoreMode {
        self.score_mode
    }

    /// Adds the output of the function of a matching filter.
    #[inline]
    pub fn update(&mut self, contribution: Score) {
        if self.count == 0 {
            self.first = contribution;
        }
        self.count += 1;
        self.total += contribution;
        self.product *= contribution;
        self.max = nan_propagating_max(self.max, contribution);
        self.min = nan_propagating_min(self.min, contribution);
    }

    /// Returns true if further contributions cannot change the outcome.
    #[inline]
    pub fn is_saturated(&self) -> bool {
        self.score_mode == ScoreMode::First && self.count > 0
    }

    /// Clears the aggregator back to its initial state.
    #[inline]
    pub fn clear(&mut self) {
        *self = ScoreAggregator::new(self.score_mode);
    }

    /// Number of contributions received so far.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Returns the aggregated score, or `None` if no filter matched.
    #[inline]
    pub fn score(&self) -> Option<Score> {
        if self.count == 0 {
            return None;
        }
        let score = match self.score_mode {
            ScoreMode::First => self.first,
            ScoreMode::Avg => self.total / self.count as Score,
            ScoreMode::Max => self.max,
            ScoreMode::Total => self.total,
            ScoreMode::Min => self.min,
            ScoreMode::Multiply => self.product,
        };
        Some(score)
    }
}

// Unlike `f32::max`/`f32::min`, a NaN operand wins.
fn nan_propagating_max(left: Score, right: Score) -> Score {
    if left.is_nan() || right.is_nan() {
        Score::NAN
    } else {
        left.max(right)
    }
}

fn nan_propagating_min(left: Score, right: Score) -> Score {
    if left.is_nan() || right.is_nan() {
        Score::NAN
    } else {
        left.min(right)
    }
}

/// Aggregates the given contributions, in order.
///
/// Returns `None` if `contributions` is empty.
pub fn aggregate_scores(
    score_mode: ScoreMode,
    contributions: impl IntoIterator<Item = Score>,
) -> Option<Score> {
    let mut aggregator = ScoreAggregator::new(score_mode);
    for contribution in contributions {
        aggregator.update(contribution);
        if aggregator.is_saturated() {
            break;
        }
    }
    aggregator.score()
}

use std::ops::DerefMut;

use crate::docset::DocSet;
use crate::Score;

/// Scored set of documents matching a query within a specific segment.
///
/// See [`Query`](crate::query::Query).
pub trait Scorer: DocSet + 'static {
    /// Returns the score.
    ///
    /// This method will perform a bit of computation and is not cached.
    ///
    /// Computing a score may fail (e.g. a score function raising an error). Such an
    /// error aborts the scan of the segment.
    fn score(&mut self) -> crate::Result<Score>;
}

impl Scorer for Box<dyn Scorer> {
    fn score(&mut self) -> crate::Result<Score> {
        self.deref_mut().score()
    }
}

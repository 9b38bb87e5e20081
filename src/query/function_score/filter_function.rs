use std::fmt;
use std::sync::Arc;

use super::{Filter, ScoreFunction};

/// Binds a [`Filter`] to a [`ScoreFunction`].
///
/// The function only contributes to the score of the documents that belong to the
/// filter.
#[derive(Clone, Hash)]
pub struct FilterFunction {
    filter: Arc<dyn Filter>,
    function: Arc<dyn ScoreFunction>,
}

impl FilterFunction {
    /// Creates a new binding.
    pub fn new(filter: Arc<dyn Filter>, function: Arc<dyn ScoreFunction>) -> FilterFunction {
        FilterFunction { filter, function }
    }

    /// Returns the filter.
    pub fn filter(&self) -> &dyn Filter {
        self.filter.as_ref()
    }

    /// Returns the score function.
    pub fn function(&self) -> &dyn ScoreFunction {
        self.function.as_ref()
    }
}

impl PartialEq for FilterFunction {
    fn eq(&self, other: &FilterFunction) -> bool {
        (*self.filter).eq(&*other.filter) && (*self.function).eq(&*other.function)
    }
}

impl Eq for FilterFunction {}

impl fmt::Debug for FilterFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{filter({:?}), function [{:?}]}}", self.filter, self.function)
    }
}

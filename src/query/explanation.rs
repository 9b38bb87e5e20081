use std::fmt;

use serde::Serialize;

use crate::{DocId, FunctionScoreError, Score};

pub(crate) fn doc_out_of_range(doc: DocId, max_doc: DocId) -> FunctionScoreError {
    FunctionScoreError::InvalidArgument(format!(
        "Document #({doc}) is out of range (max doc: {max_doc})"
    ))
}

fn is_true(val: &bool) -> bool {
    *val
}

/// Object describing the score of a given document.
/// It is organized in trees.
///
/// `.to_pretty_json()` can be useful to print out a human readable
/// representation of this tree when debugging a given score.
///
/// An explanation also tells whether the document matched the query at all.
/// Wrapping queries are expected to hand back the explanation of a non-matching
/// document unchanged.
#[derive(Clone, Serialize, PartialEq)]
pub struct Explanation {
    value: Score,
    description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<Explanation>,
    #[serde(rename = "match", skip_serializing_if = "is_true")]
    matched: bool,
}

impl fmt::Debug for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Explanation({})", self.to_pretty_json())
    }
}

impl Explanation {
    /// Creates a new explanation object for a matching document.
    pub fn new<T: ToString>(description: T, value: Score) -> Explanation {
        Explanation {
            value,
            description: description.to_string(),
            details: Vec::new(),
            matched: true,
        }
    }

    /// Creates the explanation of a document that the query does not match.
    ///
    /// Its value is `0.0`.
    pub fn no_match<T: ToString>(description: T) -> Explanation {
        Explanation {
            value: 0.0,
            description: description.to_string(),
            details: Vec::new(),
            matched: false,
        }
    }

    /// Returns the value associated to the current node.
    pub fn value(&self) -> Score {
        self.value
    }

    /// Returns the description of the current node.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns true iff the document matches the query.
    pub fn is_match(&self) -> bool {
        self.matched
    }

    /// Returns the children of the current node.
    pub fn details(&self) -> &[Explanation] {
        &self.details
    }

    /// Add some detail, explaining some part of the current node formula.
    ///
    /// Details are treated as child of the current node.
    pub fn add_detail(&mut self, child_explanation: Explanation) {
        self.details.push(child_explanation);
    }

    /// Shortcut for `self.details.push(Explanation::new(name, value));`
    pub fn add_const<T: ToString>(&mut self, name: T, value: Score) {
        self.details.push(Explanation::new(name, value));
    }

    /// Returns an indented json representation of the explanation tree for debug usage.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|err| format!("{err:?}"))
    }
}

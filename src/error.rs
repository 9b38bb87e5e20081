//! Definition of the crate's error and result.

use thiserror::Error;

/// The library's error enum
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FunctionScoreError {
    /// The score mode token is not one of `first`, `avg`, `max`, `total`, `min`,
    /// `multiply`.
    #[error("Unknown score mode: '{0}'")]
    UnknownScoreMode(String),
    /// Invalid argument was passed by the user.
    #[error("An invalid argument was passed: '{0}'")]
    InvalidArgument(String),
    /// A filter or a score function failed while evaluating a document.
    #[error("Function evaluation failed: '{0}'")]
    FunctionEvaluation(String),
    /// An Error appeared related to the fields of a segment.
    #[error("Schema error: '{0}'")]
    SchemaError(String),
    /// An internal error occurred. This is are internal states that should not be reached.
    /// e.g. a datastructure is incorrectly inititalized.
    #[error("Internal error: '{0}'")]
    InternalError(String),
    /// System error. (e.g.: We failed spawning a new thread).
    #[error("System error.'{0}'")]
    SystemError(String),
}

impl From<rayon::ThreadPoolBuildError> for FunctionScoreError {
    fn from(error: rayon::ThreadPoolBuildError) -> FunctionScoreError {
        FunctionScoreError::SystemError(error.to_string())
    }
}

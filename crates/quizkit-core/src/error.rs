//! Engine error types.
//!
//! Every fallible engine operation returns one of these variants so callers
//! can tell a bad exercise definition apart from a missing store record
//! without string matching.

use thiserror::Error;

use crate::model::ExerciseId;

/// Errors produced by the exercise engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// An exercise or submission was constructed from malformed input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A payload carried a discriminator the engine has no mapping for.
    #[error("unsupported exercise type: {0}")]
    UnsupportedType(String),

    /// The store has no exercise with this id.
    #[error("exercise {0} not found")]
    NotFound(ExerciseId),

    /// Wire data that is not shaped like an exam or exercise.
    #[error("malformed payload: {0}")]
    Malformed(String),

    /// The store failed for a reason other than a missing record.
    #[error("store error: {0}")]
    Store(String),
}

impl EngineError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        EngineError::InvalidArgument(msg.into())
    }

    /// Returns `true` if this error was caused by a store miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::NotFound(_))
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Malformed(err.to_string())
    }
}

/// Convenience alias used throughout the engine.
pub type EngineResult<T> = Result<T, EngineError>;

//! Error types for query validation and evaluation.

/// A request's criteria were rejected before any filtering began.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// One or more field names are not recognised for this entity type.
    ///
    /// Every offending name is listed, sorted.
    #[error("unrecognized query parameters: {}", .0.join(", "))]
    UnknownParameters(Vec<String>),

    /// A numeric field was given a value that is not an integer.
    #[error("invalid value {value:?} for parameter {parameter}: must be an integer")]
    InvalidInteger {
        /// The parameter as supplied, including any operator suffix.
        parameter: String,
        /// The offending value.
        value: String,
    },
}

/// Evaluation could not complete.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    /// A per-entity evaluation task panicked or was cancelled.
    #[error("evaluation task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

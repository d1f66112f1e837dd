//! Query error types
//!
//! Error codes:
//! - QUERY_INVALID_AGGREGATE_DOMAIN
//! - QUERY_MALFORMED_KEY
//! - QUERY_NUMERIC_OVERFLOW
//!
//! Errors are deterministic data-shape faults. Nothing here is retried.

use std::fmt;

use thiserror::Error;

/// Aggregates that can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunction {
    Sum,
    Average,
    Min,
    Max,
}

impl AggregateFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateFunction::Sum => "sum",
            AggregateFunction::Average => "average",
            AggregateFunction::Min => "min",
            AggregateFunction::Max => "max",
        }
    }
}

impl fmt::Display for AggregateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query error with the failing stage attached
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// average/min/max over an empty sequence
    #[error("[{stage}] {function} is undefined over an empty sequence")]
    InvalidAggregateDomain {
        stage: String,
        function: AggregateFunction,
    },

    /// A key that cannot be compared consistently with the rest of its sequence
    #[error("[{stage}] malformed key {key}: {reason}")]
    MalformedKey {
        stage: String,
        key: String,
        reason: String,
    },

    /// A running total outside the range of its numeric type
    #[error("[{stage}] {function} overflowed its numeric range")]
    NumericOverflow {
        stage: String,
        function: AggregateFunction,
    },
}

impl QueryError {
    /// Create an invalid aggregate domain error
    pub fn empty_aggregate(function: AggregateFunction) -> Self {
        QueryError::InvalidAggregateDomain {
            stage: "aggregate".to_string(),
            function,
        }
    }

    /// Create a numeric overflow error
    pub fn overflow(function: AggregateFunction) -> Self {
        QueryError::NumericOverflow {
            stage: "aggregate".to_string(),
            function,
        }
    }

    /// Create a malformed key error
    pub fn malformed_key(
        stage: impl Into<String>,
        key: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        QueryError::MalformedKey {
            stage: stage.into(),
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::InvalidAggregateDomain { .. } => "QUERY_INVALID_AGGREGATE_DOMAIN",
            QueryError::MalformedKey { .. } => "QUERY_MALFORMED_KEY",
            QueryError::NumericOverflow { .. } => "QUERY_NUMERIC_OVERFLOW",
        }
    }

    /// Returns the stage that raised the error
    pub fn stage(&self) -> &str {
        match self {
            QueryError::InvalidAggregateDomain { stage, .. } => stage,
            QueryError::MalformedKey { stage, .. } => stage,
            QueryError::NumericOverflow { stage, .. } => stage,
        }
    }

    /// Re-labels the error with the pipeline stage it surfaced from
    pub fn in_stage(self, name: impl Into<String>) -> Self {
        match self {
            QueryError::InvalidAggregateDomain { function, .. } => {
                QueryError::InvalidAggregateDomain {
                    stage: name.into(),
                    function,
                }
            }
            QueryError::MalformedKey { key, reason, .. } => QueryError::MalformedKey {
                stage: name.into(),
                key,
                reason,
            },
            QueryError::NumericOverflow { function, .. } => QueryError::NumericOverflow {
                stage: name.into(),
                function,
            },
        }
    }

    /// Returns true for the empty-input aggregate failure
    pub fn is_invalid_aggregate_domain(&self) -> bool {
        matches!(self, QueryError::InvalidAggregateDomain { .. })
    }
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

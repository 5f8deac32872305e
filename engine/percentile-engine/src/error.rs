//! Error types for percentile comparisons

use receiving_stats::TimeBucket;
use thiserror::Error;

/// Result type alias for comparison operations
pub type Result<T> = std::result::Result<T, ComparisonError>;

/// Any reason a comparison was not computed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComparisonError {
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),
}

impl ComparisonError {
    /// Lookup failures mean "no data" for a stale selection rather than bad input
    pub fn is_lookup(&self) -> bool {
        matches!(self, ComparisonError::Lookup(_))
    }
}

/// The requested metrics or players cannot form a comparison
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    #[error("Select at least {min} statistics for a meaningful comparison (got {count})")]
    TooFewMetrics { count: usize, min: usize },

    #[error("Select at most {max} statistics (got {count})")]
    TooManyMetrics { count: usize, max: usize },

    #[error("Unknown statistic: '{0}'")]
    UnknownMetric(String),

    #[error("Statistic '{0}' selected more than once")]
    DuplicateMetric(String),

    #[error("Select at least one player")]
    NoSubjects,

    #[error("Select at most {max} players (got {count})")]
    TooManySubjects { count: usize, max: usize },

    #[error("Player '{0}' selected more than once")]
    DuplicateSubject(String),
}

/// A selected player is not in the population being ranked
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("No data for '{name}' in {bucket}")]
    SubjectNotFound { name: String, bucket: TimeBucket },

    #[error("'{name}' matches {count} rows in {bucket}")]
    AmbiguousSubject {
        name: String,
        bucket: TimeBucket,
        count: usize,
    },
}

//! Error types for the receiving stats data layer

use thiserror::Error;

use crate::types::TimeBucket;

/// Result type alias for data layer operations
pub type Result<T> = std::result::Result<T, StatsError>;

/// Errors that can occur while loading or addressing receiving stats
#[derive(Error, Debug)]
pub enum StatsError {
    /// I/O errors reading the stats file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV or a cell that does not fit its column type
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// `Week` value outside 0..=18
    #[error("Invalid time bucket: {0} (expected 0 for season or 1-18 for a week)")]
    InvalidTimeBucket(u32),

    /// Same player appears twice in one time-bucket
    #[error("Duplicate row for '{name}' in {bucket}")]
    DuplicateRow { name: String, bucket: TimeBucket },

    /// Metric name not in the catalog
    #[error("Unknown metric: '{0}'")]
    UnknownMetric(String),
}

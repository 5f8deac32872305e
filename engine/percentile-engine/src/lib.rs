//! # PercentileEngine
//!
//! Ranks selected players against a population of receiving lines and
//! turns the ranks into radar-chart rendering plans.
//!
//! Percentiles are strict: the share of the population whose value is
//! strictly below the player's. Players are emitted highest average
//! percentile first so that smaller profiles are drawn on top, and every
//! polygon is closed by repeating its first vertex.

pub mod comparison;
pub mod engine;
pub mod error;
pub mod percentile;
pub mod selection;


pub use comparison::{format_value, ComparisonRow, ComparisonTable};
pub use engine::{MetricPercentile, PercentileEngine, PercentileRow, RadarPlan, RadarTrace};
pub use error::{ComparisonError, LookupError, Result, SelectionError};
pub use percentile::percentile_rank;
pub use selection::{Selection, MAX_METRICS, MAX_SUBJECTS, MIN_METRICS};

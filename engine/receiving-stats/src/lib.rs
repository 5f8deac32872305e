//! Receiving Stats - Next Gen receiving data for player comparisons
//!
//! Loads the receiving stats export, enforces one row per player per
//! time-bucket, and exposes bucket-restricted population views with the
//! filters and leaderboards the comparison tools need.

pub mod error;
pub mod loader;
pub mod population;
pub mod types;

pub use error::{Result, StatsError};
pub use loader::StatsTable;
pub use population::Population;
pub use types::{Metric, ReceivingStat, TimeBucket, Totals, MAX_WEEK};

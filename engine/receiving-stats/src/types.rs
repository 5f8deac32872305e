use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StatsError;

/// Last regular-season week that can appear as a time-bucket
pub const MAX_WEEK: u8 = 18;

/// Season aggregate or a single regular-season week.
///
/// On disk this is the integer `Week` column: `0` for the season row,
/// `1..=18` for weekly rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TimeBucket {
    /// Full-season totals/averages
    Season,
    /// A single week (1-18)
    Week(u8),
}

impl TimeBucket {
    /// Whether this bucket is the season aggregate
    pub fn is_season(&self) -> bool {
        matches!(self, TimeBucket::Season)
    }
}

impl TryFrom<u32> for TimeBucket {
    type Error = StatsError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(TimeBucket::Season),
            w if w <= MAX_WEEK as u32 => Ok(TimeBucket::Week(w as u8)),
            other => Err(StatsError::InvalidTimeBucket(other)),
        }
    }
}

impl From<TimeBucket> for u32 {
    fn from(bucket: TimeBucket) -> Self {
        match bucket {
            TimeBucket::Season => 0,
            TimeBucket::Week(w) => w as u32,
        }
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeBucket::Season => write!(f, "Season"),
            TimeBucket::Week(w) => write!(f, "Week {w}"),
        }
    }
}

/// The fixed catalog of comparable receiving metrics.
///
/// Catalog order is the order metrics are listed to users; it has no
/// bearing on the axis order of a comparison, which follows the caller's
/// selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Yards,
    Targets,
    Receptions,
    ReceivingTouchdowns,
    CatchPercentage,
    AvgYardsAfterCatch,
    AvgExpectedYac,
    YacAboveExpectation,
    AvgCushion,
    AvgSeparation,
    AvgIntendedAirYards,
    ShareOfIntendedAirYards,
}

impl Metric {
    pub const ALL: [Metric; 12] = [
        Metric::Yards,
        Metric::Targets,
        Metric::Receptions,
        Metric::ReceivingTouchdowns,
        Metric::CatchPercentage,
        Metric::AvgYardsAfterCatch,
        Metric::AvgExpectedYac,
        Metric::YacAboveExpectation,
        Metric::AvgCushion,
        Metric::AvgSeparation,
        Metric::AvgIntendedAirYards,
        Metric::ShareOfIntendedAirYards,
    ];

    /// CSV column name (e.g. "Receiving Touchdowns")
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Yards => "Yards",
            Metric::Targets => "Targets",
            Metric::Receptions => "Receptions",
            Metric::ReceivingTouchdowns => "Receiving Touchdowns",
            Metric::CatchPercentage => "Catch Percentage",
            Metric::AvgYardsAfterCatch => "Avg Yards After Catch",
            Metric::AvgExpectedYac => "Avg Expected YAC",
            Metric::YacAboveExpectation => "YAC Above Expectation",
            Metric::AvgCushion => "Avg Cushion",
            Metric::AvgSeparation => "Avg Separation",
            Metric::AvgIntendedAirYards => "Avg Intended Air Yards",
            Metric::ShareOfIntendedAirYards => "Share of Intended Air Yards (%)",
        }
    }

    /// Short axis label used on radar charts (e.g. "Rec TDs")
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Yards => "Yards",
            Metric::Targets => "Targets",
            Metric::Receptions => "Receptions",
            Metric::ReceivingTouchdowns => "Rec TDs",
            Metric::CatchPercentage => "Catch %",
            Metric::AvgYardsAfterCatch => "Avg YAC",
            Metric::AvgExpectedYac => "xYAC",
            Metric::YacAboveExpectation => "YAC+",
            Metric::AvgCushion => "Cushion",
            Metric::AvgSeparation => "Separation",
            Metric::AvgIntendedAirYards => "Air Yards",
            Metric::ShareOfIntendedAirYards => "Air Yard %",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Metric {
    type Err = StatsError;

    /// Accepts either the column name or the short label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Metric::ALL
            .iter()
            .copied()
            .find(|m| m.column() == wanted || m.label() == wanted)
            .ok_or_else(|| StatsError::UnknownMetric(s.to_string()))
    }
}

/// One player's receiving line for one time-bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceivingStat {
    /// Display name (e.g. "Ja'Marr Chase")
    pub name: String,

    /// Position (WR, TE, RB)
    pub position: String,

    /// Team abbreviation (e.g. "CIN")
    pub team: String,

    /// Season aggregate or week
    pub bucket: TimeBucket,

    pub yards: Option<f64>,
    pub targets: Option<f64>,
    pub receptions: Option<f64>,
    pub receiving_touchdowns: Option<f64>,
    pub catch_percentage: Option<f64>,
    pub avg_yards_after_catch: Option<f64>,
    pub avg_expected_yac: Option<f64>,
    pub yac_above_expectation: Option<f64>,
    pub avg_cushion: Option<f64>,
    pub avg_separation: Option<f64>,
    pub avg_intended_air_yards: Option<f64>,
    pub share_of_intended_air_yards: Option<f64>,
}

impl ReceivingStat {
    /// Create a row with every metric missing
    pub fn new(
        name: impl Into<String>,
        position: impl Into<String>,
        team: impl Into<String>,
        bucket: TimeBucket,
    ) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
            team: team.into(),
            bucket,
            yards: None,
            targets: None,
            receptions: None,
            receiving_touchdowns: None,
            catch_percentage: None,
            avg_yards_after_catch: None,
            avg_expected_yac: None,
            yac_above_expectation: None,
            avg_cushion: None,
            avg_separation: None,
            avg_intended_air_yards: None,
            share_of_intended_air_yards: None,
        }
    }

    /// Builder-style setter, mostly for fixtures
    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        *self.slot_mut(metric) = Some(value);
        self
    }

    /// Raw value for a metric, `None` when the cell was empty
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Yards => self.yards,
            Metric::Targets => self.targets,
            Metric::Receptions => self.receptions,
            Metric::ReceivingTouchdowns => self.receiving_touchdowns,
            Metric::CatchPercentage => self.catch_percentage,
            Metric::AvgYardsAfterCatch => self.avg_yards_after_catch,
            Metric::AvgExpectedYac => self.avg_expected_yac,
            Metric::YacAboveExpectation => self.yac_above_expectation,
            Metric::AvgCushion => self.avg_cushion,
            Metric::AvgSeparation => self.avg_separation,
            Metric::AvgIntendedAirYards => self.avg_intended_air_yards,
            Metric::ShareOfIntendedAirYards => self.share_of_intended_air_yards,
        }
    }

    /// Value usable for ranking: present and not NaN. Infinite values
    /// stay in and rank above every finite value.
    pub fn comparable(&self, metric: Metric) -> Option<f64> {
        self.metric(metric).filter(|v| !v.is_nan())
    }

    fn slot_mut(&mut self, metric: Metric) -> &mut Option<f64> {
        match metric {
            Metric::Yards => &mut self.yards,
            Metric::Targets => &mut self.targets,
            Metric::Receptions => &mut self.receptions,
            Metric::ReceivingTouchdowns => &mut self.receiving_touchdowns,
            Metric::CatchPercentage => &mut self.catch_percentage,
            Metric::AvgYardsAfterCatch => &mut self.avg_yards_after_catch,
            Metric::AvgExpectedYac => &mut self.avg_expected_yac,
            Metric::YacAboveExpectation => &mut self.yac_above_expectation,
            Metric::AvgCushion => &mut self.avg_cushion,
            Metric::AvgSeparation => &mut self.avg_separation,
            Metric::AvgIntendedAirYards => &mut self.avg_intended_air_yards,
            Metric::ShareOfIntendedAirYards => &mut self.share_of_intended_air_yards,
        }
    }
}

/// Summary figures over a population view
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub yards: f64,
    pub receptions: f64,
    pub touchdowns: f64,
    /// Mean catch percentage over rows that have one; `None` when no row does
    pub avg_catch_percentage: Option<f64>,
}

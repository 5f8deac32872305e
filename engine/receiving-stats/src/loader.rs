use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{Result, StatsError};
use crate::population::Population;
use crate::types::{ReceivingStat, TimeBucket};

/// One CSV record as written by the Next Gen stats export.
///
/// Columns not listed here (`Season`, `Season Type`, `Player GSIS ID`)
/// are ignored.
#[derive(Debug, Deserialize)]
struct RawReceivingStat {
    #[serde(rename = "Player Name")]
    name: String,
    #[serde(rename = "Position", default)]
    position: String,
    #[serde(rename = "Team Abbreviation", default)]
    team: String,
    #[serde(rename = "Week")]
    week: u32,
    #[serde(rename = "Yards", default)]
    yards: Option<f64>,
    #[serde(rename = "Targets", default)]
    targets: Option<f64>,
    #[serde(rename = "Receptions", default)]
    receptions: Option<f64>,
    #[serde(rename = "Receiving Touchdowns", default)]
    receiving_touchdowns: Option<f64>,
    #[serde(rename = "Catch Percentage", default)]
    catch_percentage: Option<f64>,
    #[serde(rename = "Avg Yards After Catch", default)]
    avg_yards_after_catch: Option<f64>,
    #[serde(rename = "Avg Expected YAC", default)]
    avg_expected_yac: Option<f64>,
    #[serde(rename = "YAC Above Expectation", default)]
    yac_above_expectation: Option<f64>,
    #[serde(rename = "Avg Cushion", default)]
    avg_cushion: Option<f64>,
    #[serde(rename = "Avg Separation", default)]
    avg_separation: Option<f64>,
    #[serde(rename = "Avg Intended Air Yards", default)]
    avg_intended_air_yards: Option<f64>,
    #[serde(rename = "Share of Intended Air Yards (%)", default)]
    share_of_intended_air_yards: Option<f64>,
}

impl RawReceivingStat {
    fn into_stat(self, bucket: TimeBucket) -> ReceivingStat {
        ReceivingStat {
            name: self.name,
            position: self.position,
            team: self.team,
            bucket,
            yards: self.yards,
            targets: self.targets,
            receptions: self.receptions,
            receiving_touchdowns: self.receiving_touchdowns,
            catch_percentage: self.catch_percentage,
            avg_yards_after_catch: self.avg_yards_after_catch,
            avg_expected_yac: self.avg_expected_yac,
            yac_above_expectation: self.yac_above_expectation,
            avg_cushion: self.avg_cushion,
            avg_separation: self.avg_separation,
            avg_intended_air_yards: self.avg_intended_air_yards,
            share_of_intended_air_yards: self.share_of_intended_air_yards,
        }
    }
}

/// Every loaded row across all time-buckets, in file order.
///
/// Guarantees at most one row per (player, bucket).
#[derive(Debug, Clone, Default)]
pub struct StatsTable {
    rows: Vec<ReceivingStat>,
}

impl StatsTable {
    /// Build a table from already-typed rows
    pub fn from_rows(rows: Vec<ReceivingStat>) -> Result<Self> {
        let mut seen: HashSet<(String, TimeBucket)> = HashSet::new();
        for row in &rows {
            if !seen.insert((row.name.clone(), row.bucket)) {
                return Err(StatsError::DuplicateRow {
                    name: row.name.clone(),
                    bucket: row.bucket,
                });
            }
        }
        Ok(Self { rows })
    }

    /// Parse CSV from any reader
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
        let mut rows = Vec::new();
        let mut skipped = 0usize;

        for result in reader.deserialize::<RawReceivingStat>() {
            let raw = result?;
            match TimeBucket::try_from(raw.week) {
                Ok(bucket) => rows.push(raw.into_stat(bucket)),
                Err(e) => {
                    warn!("Skipping row for {}: {}", raw.name, e);
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            warn!("Skipped {} rows outside the regular season", skipped);
        }

        Self::from_rows(rows)
    }

    /// Load the stats CSV from disk
    pub async fn load_from_file<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        info!("Loading receiving stats from: {:?}", file_path.as_ref());

        let content = tokio::fs::read_to_string(&file_path).await?;
        let table = Self::from_reader(content.as_bytes())?;

        info!("Loaded {} rows", table.len());
        Ok(table)
    }

    pub fn rows(&self) -> &[ReceivingStat] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Restrict to a single time-bucket
    pub fn slice(&self, bucket: TimeBucket) -> Population<'_> {
        Population::new(bucket, self.rows.iter().filter(|r| r.bucket == bucket).collect())
    }

    /// Weekly buckets present in the table, ascending
    pub fn weeks(&self) -> Vec<TimeBucket> {
        self.rows
            .iter()
            .map(|r| r.bucket)
            .filter(|b| !b.is_season())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

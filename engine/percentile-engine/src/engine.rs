use receiving_stats::{Metric, Population, TimeBucket};
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::percentile::percentile_rank;
use crate::selection::Selection;

/// One axis of a player's profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricPercentile {
    pub metric: Metric,
    /// Player's own value, `None` when the cell was empty
    pub actual: Option<f64>,
    /// Strict percentile in [0, 100]
    pub percentile: f64,
}

/// A player's percentiles in metric-selection order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentileRow {
    pub player: String,
    /// Position in the caller's player selection
    pub selection_index: usize,
    pub entries: Vec<MetricPercentile>,
    /// Mean of `entries` percentiles; only used for draw order
    pub average_percentile: f64,
}

/// A closed radar polygon for one player.
///
/// `labels`, `percentiles` and `actual_values` each repeat their first
/// element at the end, so all three are one longer than the metric list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarTrace {
    pub player: String,
    pub selection_index: usize,
    pub labels: Vec<String>,
    pub percentiles: Vec<f64>,
    pub actual_values: Vec<Option<f64>>,
    pub average_percentile: f64,
}

impl From<PercentileRow> for RadarTrace {
    fn from(row: PercentileRow) -> Self {
        let labels = row.entries.iter().map(|e| e.metric.label().to_string()).collect();
        let percentiles = row.entries.iter().map(|e| e.percentile).collect();
        let actual_values = row.entries.iter().map(|e| e.actual).collect();

        Self {
            player: row.player,
            selection_index: row.selection_index,
            labels: close(labels),
            percentiles: close(percentiles),
            actual_values: close(actual_values),
            average_percentile: row.average_percentile,
        }
    }
}

/// Traces in draw order: the highest average percentile first, so smaller
/// profiles end up on top
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarPlan {
    pub bucket: TimeBucket,
    pub metrics: Vec<Metric>,
    pub traces: Vec<RadarTrace>,
}

impl RadarPlan {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Percentile comparison of up to two players against a population
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentileEngine;

impl PercentileEngine {
    pub fn new() -> Self {
        Self
    }

    /// Validate the selection and compute each player's percentile row,
    /// in selection order
    pub fn percentile_rows<M, S>(
        &self,
        population: &Population<'_>,
        metrics: &[M],
        subjects: &[S],
    ) -> Result<Vec<PercentileRow>>
    where
        M: AsRef<str>,
        S: AsRef<str>,
    {
        let selection = Selection::new(metrics, subjects)?;
        self.rows_for(population, &selection)
    }

    /// Same as [`percentile_rows`](Self::percentile_rows) for a pre-validated
    /// selection
    pub fn rows_for(
        &self,
        population: &Population<'_>,
        selection: &Selection,
    ) -> Result<Vec<PercentileRow>> {
        let players = selection.resolve(population)?;

        let rows = players
            .into_iter()
            .enumerate()
            .map(|(selection_index, player)| {
                let entries: Vec<MetricPercentile> = selection
                    .metrics()
                    .iter()
                    .map(|&metric| {
                        let actual = player.comparable(metric);
                        let values = population.rows().iter().map(|r| r.metric(metric));
                        let percentile = percentile_rank(values, actual);
                        MetricPercentile {
                            metric,
                            actual,
                            percentile,
                        }
                    })
                    .collect();

                let average_percentile =
                    entries.iter().map(|e| e.percentile).sum::<f64>() / entries.len() as f64;

                debug!(
                    "{} ({}): average percentile {:.1} over {} metrics",
                    player.name,
                    population.bucket(),
                    average_percentile,
                    entries.len()
                );

                PercentileRow {
                    player: player.name.clone(),
                    selection_index,
                    entries,
                    average_percentile,
                }
            })
            .collect();

        Ok(rows)
    }

    /// Full comparison: percentiles, draw order and closed polygons
    pub fn compute_percentiles<M, S>(
        &self,
        population: &Population<'_>,
        metrics: &[M],
        subjects: &[S],
    ) -> Result<RadarPlan>
    where
        M: AsRef<str>,
        S: AsRef<str>,
    {
        let selection = Selection::new(metrics, subjects)?;
        self.plan_for(population, &selection)
    }

    /// Same as [`compute_percentiles`](Self::compute_percentiles) for a
    /// pre-validated selection
    pub fn plan_for(
        &self,
        population: &Population<'_>,
        selection: &Selection,
    ) -> Result<RadarPlan> {
        let mut rows = self.rows_for(population, selection)?;

        // stable: equal averages keep selection order
        rows.sort_by(|a, b| b.average_percentile.total_cmp(&a.average_percentile));

        Ok(RadarPlan {
            bucket: population.bucket(),
            metrics: selection.metrics().to_vec(),
            traces: rows.into_iter().map(RadarTrace::from).collect(),
        })
    }
}

/// Repeat the first element at the end
fn close<T: Clone>(mut series: Vec<T>) -> Vec<T> {
    if let Some(first) = series.first().cloned() {
        series.push(first);
    }
    series
}

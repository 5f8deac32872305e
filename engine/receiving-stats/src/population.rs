use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::types::{Metric, ReceivingStat, TimeBucket, Totals};

/// Number of players picked when the caller has not chosen any
pub const DEFAULT_SUBJECT_COUNT: usize = 2;

/// Rows of a single time-bucket, in file order.
///
/// A population is a borrowed view; it never owns or copies player rows.
#[derive(Debug, Clone)]
pub struct Population<'a> {
    bucket: TimeBucket,
    rows: Vec<&'a ReceivingStat>,
}

impl<'a> Population<'a> {
    /// Create a view; rows from other buckets are dropped
    pub fn new(bucket: TimeBucket, rows: Vec<&'a ReceivingStat>) -> Self {
        let rows = rows.into_iter().filter(|r| r.bucket == bucket).collect();
        Self { bucket, rows }
    }

    pub fn bucket(&self) -> TimeBucket {
        self.bucket
    }

    pub fn rows(&self) -> &[&'a ReceivingStat] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows carrying this name
    pub fn find<'s>(&'s self, name: &'s str) -> impl Iterator<Item = &'a ReceivingStat> + 's {
        self.rows.iter().copied().filter(move |r| r.name == name)
    }

    /// Comparable (present, non-NaN) values of a metric across the view
    pub fn values(&self, metric: Metric) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().filter_map(move |r| r.comparable(metric))
    }

    /// Narrow by team and/or position; `None` keeps everything
    pub fn filter(&self, team: Option<&str>, position: Option<&str>) -> Population<'a> {
        let rows = self
            .rows
            .iter()
            .copied()
            .filter(|r| team.map_or(true, |t| r.team == t))
            .filter(|r| position.map_or(true, |p| r.position == p))
            .collect();
        Population {
            bucket: self.bucket,
            rows,
        }
    }

    /// Keep only the named player (exact match); `None` keeps everything
    pub fn only_player(&self, name: Option<&str>) -> Population<'a> {
        let rows = self
            .rows
            .iter()
            .copied()
            .filter(|r| name.map_or(true, |n| r.name == n))
            .collect();
        Population {
            bucket: self.bucket,
            rows,
        }
    }

    /// Top `n` rows by a metric, highest first. Rows without a comparable
    /// value are left out; equal values keep file order.
    pub fn leaders(&self, metric: Metric, n: usize) -> Vec<&'a ReceivingStat> {
        let mut ranked: Vec<(&'a ReceivingStat, f64)> = self
            .rows
            .iter()
            .filter_map(|r| r.comparable(metric).map(|v| (*r, v)))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked.into_iter().take(n).map(|(r, _)| r).collect()
    }

    /// Players pre-selected for a comparison: most receiving touchdowns
    pub fn default_subjects(&self) -> Vec<String> {
        self.leaders(Metric::ReceivingTouchdowns, DEFAULT_SUBJECT_COUNT)
            .into_iter()
            .map(|r| r.name.clone())
            .collect()
    }

    /// Distinct player names, sorted
    pub fn player_names(&self) -> Vec<String> {
        self.distinct(|r| &r.name)
    }

    /// Distinct team abbreviations, sorted
    pub fn teams(&self) -> Vec<String> {
        self.distinct(|r| &r.team)
    }

    /// Distinct positions, sorted
    pub fn positions(&self) -> Vec<String> {
        self.distinct(|r| &r.position)
    }

    /// Yards/receptions/touchdowns summed over the view and the mean catch
    /// percentage (missing cells skipped)
    pub fn totals(&self) -> Totals {
        let (catch_sum, catch_count) = self
            .values(Metric::CatchPercentage)
            .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));

        Totals {
            yards: self.sum(Metric::Yards),
            receptions: self.sum(Metric::Receptions),
            touchdowns: self.sum(Metric::ReceivingTouchdowns),
            avg_catch_percentage: (catch_count > 0).then(|| catch_sum / catch_count as f64),
        }
    }

    fn sum(&self, metric: Metric) -> f64 {
        self.values(metric).fold(0.0, |acc, v| acc + v)
    }

    fn distinct<F>(&self, field: F) -> Vec<String>
    where
        F: Fn(&ReceivingStat) -> &String,
    {
        self.rows
            .iter()
            .map(|r| field(r).clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

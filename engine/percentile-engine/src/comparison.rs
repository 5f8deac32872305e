//! Side-by-side comparison table
//!
//! The tabular companion of a radar chart: one column per selected player,
//! one row per attribute, numeric values rounded to one decimal.

use receiving_stats::Population;
use serde::Serialize;
use std::fmt;

use crate::error::Result;
use crate::selection::Selection;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub label: String,
    /// One cell per player, in `ComparisonTable::players` order
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonTable {
    pub players: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    /// Build the table for a metric/player selection.
    ///
    /// Validation and lookup follow the same rules as the percentile engine.
    pub fn build<M, S>(
        population: &Population<'_>,
        metrics: &[M],
        subjects: &[S],
    ) -> Result<Self>
    where
        M: AsRef<str>,
        S: AsRef<str>,
    {
        let selection = Selection::new(metrics, subjects)?;
        Self::for_selection(population, &selection)
    }

    pub fn for_selection(population: &Population<'_>, selection: &Selection) -> Result<Self> {
        let players = selection.resolve(population)?;

        let mut rows = vec![
            ComparisonRow {
                label: "Position".to_string(),
                cells: players.iter().map(|p| p.position.clone()).collect(),
            },
            ComparisonRow {
                label: "Team".to_string(),
                cells: players.iter().map(|p| p.team.clone()).collect(),
            },
        ];

        for metric in selection.metrics() {
            rows.push(ComparisonRow {
                label: metric.column().to_string(),
                cells: players.iter().map(|p| format_value(p.metric(*metric))).collect(),
            });
        }

        Ok(Self {
            players: players.iter().map(|p| p.name.clone()).collect(),
            rows,
        })
    }
}

/// One decimal place; missing and NaN values render empty
pub fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if !v.is_nan() => format!("{v:.1}"),
        _ => String::new(),
    }
}

impl fmt::Display for ComparisonTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = self
            .rows
            .iter()
            .map(|r| r.label.chars().count())
            .max()
            .unwrap_or(0);
        let widths: Vec<usize> = self
            .players
            .iter()
            .enumerate()
            .map(|(i, name)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.cells.get(i))
                    .map(|c| c.chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:label_width$}", "")?;
        for (name, width) in self.players.iter().zip(widths.iter().copied()) {
            write!(f, "  {name:>width$}")?;
        }
        writeln!(f)?;

        for row in &self.rows {
            write!(f, "{:label_width$}", row.label)?;
            for (cell, width) in row.cells.iter().zip(widths.iter().copied()) {
                write!(f, "  {cell:>width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

use receiving_stats::{Metric, Population, ReceivingStat};

use crate::error::{LookupError, SelectionError};

/// Fewest metrics that make a readable radar chart
pub const MIN_METRICS: usize = 3;

/// Most metrics a single comparison may show
pub const MAX_METRICS: usize = 7;

/// Most players drawn on one chart
pub const MAX_SUBJECTS: usize = 2;

/// A validated metric/player selection.
///
/// Metric order is the axis order and is kept as given. Player order is the
/// selection order used to break draw-order ties.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    metrics: Vec<Metric>,
    subjects: Vec<String>,
}

impl Selection {
    /// Parse and validate metric names (column name or short label) and players
    pub fn new<M, S>(metrics: &[M], subjects: &[S]) -> Result<Self, SelectionError>
    where
        M: AsRef<str>,
        S: AsRef<str>,
    {
        let parsed = metrics
            .iter()
            .map(|m| {
                m.as_ref()
                    .parse::<Metric>()
                    .map_err(|_| SelectionError::UnknownMetric(m.as_ref().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_metrics(parsed, subjects)
    }

    /// Validate an already-typed metric list
    pub fn from_metrics<S: AsRef<str>>(
        metrics: Vec<Metric>,
        subjects: &[S],
    ) -> Result<Self, SelectionError> {
        for (i, metric) in metrics.iter().enumerate() {
            if metrics[..i].contains(metric) {
                return Err(SelectionError::DuplicateMetric(metric.column().to_string()));
            }
        }
        if metrics.len() < MIN_METRICS {
            return Err(SelectionError::TooFewMetrics {
                count: metrics.len(),
                min: MIN_METRICS,
            });
        }
        if metrics.len() > MAX_METRICS {
            return Err(SelectionError::TooManyMetrics {
                count: metrics.len(),
                max: MAX_METRICS,
            });
        }

        if subjects.is_empty() {
            return Err(SelectionError::NoSubjects);
        }
        if subjects.len() > MAX_SUBJECTS {
            return Err(SelectionError::TooManySubjects {
                count: subjects.len(),
                max: MAX_SUBJECTS,
            });
        }
        let subjects: Vec<String> = subjects.iter().map(|s| s.as_ref().to_string()).collect();
        for (i, name) in subjects.iter().enumerate() {
            if subjects[..i].contains(name) {
                return Err(SelectionError::DuplicateSubject(name.clone()));
            }
        }

        Ok(Self { metrics, subjects })
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    /// Find each selected player's row, in selection order.
    ///
    /// Every player is looked up before anything is returned.
    pub fn resolve<'a>(
        &self,
        population: &Population<'a>,
    ) -> Result<Vec<&'a ReceivingStat>, LookupError> {
        self.subjects
            .iter()
            .map(|name| {
                let mut matches = population.find(name);
                match (matches.next(), matches.count()) {
                    (Some(row), 0) => Ok(row),
                    (Some(_), extra) => Err(LookupError::AmbiguousSubject {
                        name: name.clone(),
                        bucket: population.bucket(),
                        count: extra + 1,
                    }),
                    (None, _) => Err(LookupError::SubjectNotFound {
                        name: name.clone(),
                        bucket: population.bucket(),
                    }),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use receiving_stats::TimeBucket;

    const THREE: [&str; 3] = ["Yards", "Targets", "Receptions"];

    #[test]
    fn accepts_labels_and_columns_in_order() {
        let sel = Selection::new(&["Rec TDs", "Yards", "Catch Percentage"], &["A"]).unwrap();
        assert_eq!(
            sel.metrics(),
            &[Metric::ReceivingTouchdowns, Metric::Yards, Metric::CatchPercentage]
        );
        assert_eq!(sel.subjects(), &["A".to_string()]);
    }

    #[test]
    fn metric_count_bounds() {
        assert_eq!(
            Selection::new(&["Yards", "Targets"], &["A"]),
            Err(SelectionError::TooFewMetrics { count: 2, min: 3 })
        );

        let eight: Vec<&str> = Metric::ALL[..8].iter().map(|m| m.column()).collect();
        assert_eq!(
            Selection::new(&eight, &["A"]),
            Err(SelectionError::TooManyMetrics { count: 8, max: 7 })
        );

        let seven: Vec<&str> = Metric::ALL[..7].iter().map(|m| m.column()).collect();
        assert!(Selection::new(&seven, &["A"]).is_ok());
    }

    #[test]
    fn unknown_and_duplicate_metrics() {
        assert_eq!(
            Selection::new(&["Yards", "Targets", "Fantasy Points"], &["A"]),
            Err(SelectionError::UnknownMetric("Fantasy Points".to_string()))
        );
        assert_eq!(
            Selection::new(&["Yards", "Targets", "Yards"], &["A"]),
            Err(SelectionError::DuplicateMetric("Yards".to_string()))
        );
        // label and column of the same metric are the same metric
        assert_eq!(
            Selection::new(&["Rec TDs", "Targets", "Receiving Touchdowns"], &["A"]),
            Err(SelectionError::DuplicateMetric("Receiving Touchdowns".to_string()))
        );
    }

    #[test]
    fn subject_count_bounds() {
        let none: [&str; 0] = [];
        assert_eq!(Selection::new(&THREE, &none), Err(SelectionError::NoSubjects));
        assert_eq!(
            Selection::new(&THREE, &["A", "B", "C"]),
            Err(SelectionError::TooManySubjects { count: 3, max: 2 })
        );
        assert_eq!(
            Selection::new(&THREE, &["A", "A"]),
            Err(SelectionError::DuplicateSubject("A".to_string()))
        );
    }

    #[test]
    fn resolve_reports_missing_and_ambiguous() {
        let rows = vec![
            ReceivingStat::new("A", "WR", "BUF", TimeBucket::Week(1)),
            ReceivingStat::new("B", "WR", "BUF", TimeBucket::Week(1)),
            ReceivingStat::new("B", "TE", "MIA", TimeBucket::Week(1)),
        ];
        let pop = Population::new(TimeBucket::Week(1), rows.iter().collect());

        let found = Selection::new(&THREE, &["A"]).unwrap().resolve(&pop).unwrap();
        assert_eq!(found[0].name, "A");

        assert_eq!(
            Selection::new(&THREE, &["A", "Z"]).unwrap().resolve(&pop),
            Err(LookupError::SubjectNotFound {
                name: "Z".to_string(),
                bucket: TimeBucket::Week(1),
            })
        );
        assert_eq!(
            Selection::new(&THREE, &["B"]).unwrap().resolve(&pop),
            Err(LookupError::AmbiguousSubject {
                name: "B".to_string(),
                bucket: TimeBucket::Week(1),
                count: 2,
            })
        );
    }
}

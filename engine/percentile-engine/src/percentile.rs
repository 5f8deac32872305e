//! Strict percentile rank

/// Percentage of comparable values strictly below `actual`.
///
/// Missing and NaN entries are dropped from the comparison set before
/// counting; infinities are ordinary extremes. Ties never count toward the
/// rank, so a value equal to every other value ranks 0. With nothing to
/// compare against, or no `actual`, the rank is 0.
pub fn percentile_rank<I>(values: I, actual: Option<f64>) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut total = 0usize;
    let mut below = 0usize;

    for v in values.into_iter().flatten().filter(|v| !v.is_nan()) {
        total += 1;
        if let Some(a) = actual {
            if v < a {
                below += 1;
            }
        }
    }

    if total == 0 {
        return 0.0;
    }
    100.0 * below as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn strict_rank_scenario() {
        let yards = some(&[100.0, 50.0, 75.0]);
        let a = percentile_rank(yards.clone(), Some(100.0));
        assert!((a - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(percentile_rank(yards, Some(50.0)), 0.0);
    }

    #[test]
    fn unique_min_is_zero_and_max_is_n_minus_one_over_n() {
        let values = some(&[3.0, 9.0, 1.0, 4.0, 7.0]);
        assert_eq!(percentile_rank(values.clone(), Some(1.0)), 0.0);
        assert_eq!(percentile_rank(values, Some(9.0)), 80.0);
    }

    #[test]
    fn ties_do_not_count() {
        let values = some(&[5.0, 5.0, 5.0, 5.0]);
        assert_eq!(percentile_rank(values.clone(), Some(5.0)), 0.0);

        let mixed = some(&[1.0, 5.0, 5.0, 9.0]);
        assert_eq!(percentile_rank(mixed, Some(5.0)), 25.0);
    }

    #[test]
    fn missing_values_are_excluded_not_zero() {
        let values = vec![Some(100.0), None, Some(50.0), Some(f64::NAN)];
        // compared against {100, 50} only
        assert_eq!(percentile_rank(values, Some(100.0)), 50.0);

        // a missing value treated as 0 would have counted here
        let values = vec![Some(10.0), None];
        assert_eq!(percentile_rank(values, Some(5.0)), 0.0);
    }

    #[test]
    fn infinities_rank_as_extremes() {
        let yards = vec![Some(f64::INFINITY), Some(50.0), Some(75.0)];
        let top = percentile_rank(yards.clone(), Some(f64::INFINITY));
        assert!((top - 200.0 / 3.0).abs() < 1e-9);
        assert!((percentile_rank(yards, Some(75.0)) - 100.0 / 3.0).abs() < 1e-9);

        let floor = vec![Some(f64::NEG_INFINITY), Some(0.0)];
        assert_eq!(percentile_rank(floor, Some(0.0)), 50.0);
    }

    #[test]
    fn zero_and_negative_actuals() {
        let values = some(&[-2.0, 0.0, 1.5]);
        assert!((percentile_rank(values.clone(), Some(0.0)) - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(percentile_rank(values, Some(-2.0)), 0.0);
    }

    #[test]
    fn degenerate_inputs_rank_zero() {
        assert_eq!(percentile_rank(Vec::new(), Some(10.0)), 0.0);
        assert_eq!(percentile_rank(vec![None, Some(f64::NAN)], Some(10.0)), 0.0);
        assert_eq!(percentile_rank(some(&[1.0, 2.0]), None), 0.0);
    }
}

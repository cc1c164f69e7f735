//! Friedman rank test for related samples.

use statrs::function::gamma::gamma_ur;

use crate::error::StatError;

/// Outcome of a Friedman test.
#[derive(Debug, Clone, PartialEq)]
pub struct FriedmanTest {
    /// The tie-corrected chi-square approximation of the test statistic.
    pub statistic: f64,
    /// Degrees of freedom (k − 1).
    pub df: f64,
    /// Upper-tail p-value.
    pub p_value: f64,
}

/// Runs the Friedman rank test across related samples.
///
/// Each row holds one subject's measurements for all k conditions (in
/// the survey setting: one user's order values for every code sample).
/// Values are ranked within each row with average ranks for ties, and
/// the tie-corrected statistic is referred to a chi-square distribution
/// with k − 1 degrees of freedom.
///
/// # Errors
///
/// * [`StatError::UnequalLength`] - rows differ in length
/// * [`StatError::InsufficientData`] - fewer than three conditions or
///   fewer than two complete rows
/// * [`StatError::DegenerateVariance`] - every row is fully tied, so the
///   tie correction vanishes
///
/// # Examples
///
/// ```
/// use codesurvey_stats::friedman;
///
/// let rows = vec![
///     vec![1.0, 2.0, 3.0],
///     vec![2.0, 1.0, 3.0],
///     vec![1.0, 2.0, 3.0],
///     vec![1.0, 3.0, 2.0],
/// ];
/// let result = friedman::friedman_test(&rows).unwrap();
/// assert!((result.statistic - 4.5).abs() < 1e-12);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn friedman_test(rows: &[Vec<f64>]) -> Result<FriedmanTest, StatError> {
    let n = rows.len();
    let k = rows.first().map_or(0, Vec::len);
    if let Some(row) = rows.iter().find(|row| row.len() != k) {
        return Err(StatError::UnequalLength {
            left: k,
            right: row.len(),
        });
    }
    if k < 3 {
        return Err(StatError::InsufficientData { needed: 3, got: k });
    }
    if n < 2 {
        return Err(StatError::InsufficientData { needed: 2, got: n });
    }

    let ranked = rows.iter().map(|row| average_ranks(row)).collect::<Vec<_>>();

    // Tie correction: sum of t^3 - t over every group of t tied ranks.
    let mut tie_term = 0.0;
    for row in &ranked {
        let mut sorted = row.clone();
        sorted.sort_by(f64::total_cmp);
        let mut index = 0;
        while index < sorted.len() {
            let mut run = 1;
            while index + run < sorted.len() && sorted[index + run] == sorted[index] {
                run += 1;
            }
            let t = run as f64;
            tie_term += t.powi(3) - t;
            index += run;
        }
    }
    let (n_f, k_f) = (n as f64, k as f64);
    let correction = 1.0 - tie_term / (k_f * (k_f * k_f - 1.0) * n_f);
    if correction <= 0.0 {
        return Err(StatError::DegenerateVariance);
    }

    let ssbn = (0..k)
        .map(|j| ranked.iter().map(|row| row[j]).sum::<f64>().powi(2))
        .sum::<f64>();
    let statistic =
        ((12.0 * ssbn / (n_f * k_f * (k_f + 1.0)) - 3.0 * n_f * (k_f + 1.0)) / correction).max(0.0);
    let df = k_f - 1.0;
    let p_value = gamma_ur(df / 2.0, statistic / 2.0).clamp(0.0, 1.0);

    Ok(FriedmanTest {
        statistic,
        df,
        p_value,
    })
}

/// Ranks a row in ascending order, assigning tied values their average rank.
#[expect(clippy::cast_precision_loss)]
fn average_ranks(row: &[f64]) -> Vec<f64> {
    let mut order = (0..row.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| row[a].total_cmp(&row[b]));

    let mut ranks = vec![0.0; row.len()];
    let mut index = 0;
    while index < order.len() {
        let mut run = 1;
        while index + run < order.len() && row[order[index + run]] == row[order[index]] {
            run += 1;
        }
        let average = (index + run + index + 1) as f64 / 2.0;
        for &position in &order[index..index + run] {
            ranks[position] = average;
        }
        index += run;
    }
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_ranks_with_ties() {
        assert_eq!(average_ranks(&[1.0, 1.0, 2.0]), vec![1.5, 1.5, 3.0]);
        assert_eq!(average_ranks(&[3.0, 1.0, 2.0]), vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_no_ties() {
        // Column rank sums [5, 8, 11]; statistic 4.5; with df = 2 the
        // p-value has the closed form e^{-statistic/2}.
        let rows = vec![
            vec![1.0, 2.0, 3.0],
            vec![2.0, 1.0, 3.0],
            vec![1.0, 2.0, 3.0],
            vec![1.0, 3.0, 2.0],
        ];
        let result = friedman_test(&rows).unwrap();
        assert!((result.statistic - 4.5).abs() < 1e-12);
        assert_eq!(result.df, 2.0);
        assert!((result.p_value - 0.105_399_224_561_864_33).abs() < 1e-12);
    }

    #[test]
    fn test_tie_correction() {
        let rows = vec![
            vec![1.0, 1.0, 2.0],
            vec![2.0, 1.0, 3.0],
            vec![1.0, 3.0, 2.0],
            vec![2.0, 2.0, 1.0],
        ];
        let result = friedman_test(&rows).unwrap();
        assert!((result.statistic - 0.571_428_571_428_571_4).abs() < 1e-12);
        assert!((result.p_value - 0.751_477_293_075_286).abs() < 1e-9);
    }

    #[test]
    fn test_too_few_conditions() {
        let rows = vec![vec![1.0, 2.0], vec![2.0, 1.0]];
        assert_eq!(
            friedman_test(&rows),
            Err(StatError::InsufficientData { needed: 3, got: 2 })
        );
    }

    #[test]
    fn test_too_few_rows() {
        let rows = vec![vec![1.0, 2.0, 3.0]];
        assert_eq!(
            friedman_test(&rows),
            Err(StatError::InsufficientData { needed: 2, got: 1 })
        );
    }

    #[test]
    fn test_fully_tied_rows() {
        let rows = vec![vec![1.0, 1.0, 1.0], vec![2.0, 2.0, 2.0]];
        assert_eq!(friedman_test(&rows), Err(StatError::DegenerateVariance));
    }

    #[test]
    fn test_ragged_rows() {
        let rows = vec![vec![1.0, 2.0, 3.0], vec![1.0, 2.0]];
        assert_eq!(
            friedman_test(&rows),
            Err(StatError::UnequalLength { left: 3, right: 2 })
        );
    }
}

//! Paired (related-samples) t-test.

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::{descriptive, error::StatError};

/// Outcome of a paired t-test.
#[derive(Debug, Clone, PartialEq)]
pub struct PairedTTest {
    /// The t statistic of the mean difference.
    pub statistic: f64,
    /// Degrees of freedom (n − 1).
    pub df: f64,
    /// Two-sided p-value.
    pub p_value: f64,
}

/// Runs a two-sided paired t-test over positionally paired samples.
///
/// The pairing is by index: `first[i]` is compared against `second[i]`.
///
/// # Errors
///
/// * [`StatError::UnequalLength`] - the slices differ in length
/// * [`StatError::InsufficientData`] - fewer than two pairs
/// * [`StatError::DegenerateVariance`] - all differences are identical
///
/// # Examples
///
/// ```
/// use codesurvey_stats::ttest;
///
/// let result = ttest::paired(&[1.0, 3.0], &[2.0, 6.0]).unwrap();
/// assert!((result.statistic - (-2.0)).abs() < 1e-12);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn paired(first: &[f64], second: &[f64]) -> Result<PairedTTest, StatError> {
    if first.len() != second.len() {
        return Err(StatError::UnequalLength {
            left: first.len(),
            right: second.len(),
        });
    }
    let differences = first
        .iter()
        .zip(second)
        .map(|(a, b)| a - b)
        .collect::<Vec<_>>();
    let n = differences.len();
    if n < 2 {
        return Err(StatError::InsufficientData { needed: 2, got: n });
    }

    let mean_diff = descriptive::mean(&differences).ok_or(StatError::InsufficientData {
        needed: 2,
        got: n,
    })?;
    let variance =
        descriptive::sample_variance(&differences).ok_or(StatError::DegenerateVariance)?;
    if variance <= 0.0 {
        return Err(StatError::DegenerateVariance);
    }

    let standard_error = (variance / n as f64).sqrt();
    let statistic = mean_diff / standard_error;
    let df = (n - 1) as f64;
    let distribution =
        StudentsT::new(0.0, 1.0, df).map_err(|_| StatError::DegenerateVariance)?;
    let p_value = (2.0 * (1.0 - distribution.cdf(statistic.abs()))).clamp(0.0, 1.0);

    Ok(PairedTTest {
        statistic,
        df,
        p_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_pairs() {
        // Differences are [-1, -3]; with df = 1 the reference p-value
        // has the closed form 1 - 2*atan(|t|)/pi.
        let result = paired(&[1.0, 3.0], &[2.0, 6.0]).unwrap();
        assert!((result.statistic - (-2.0)).abs() < 1e-12);
        assert_eq!(result.df, 1.0);
        assert!((result.p_value - 0.295_167_235_300_866_5).abs() < 1e-9);
    }

    #[test]
    fn test_five_pairs() {
        let first = [3.0, 1.0, 2.0, 4.0, 2.0];
        let second = [2.0, 1.0, 4.0, 5.0, 4.0];
        let result = paired(&first, &second).unwrap();
        assert!((result.statistic - (-1.371_988_681_140_070_6)).abs() < 1e-12);
        assert!((result.p_value - 0.241_981_530_336_840_47).abs() < 1e-6);
    }

    #[test]
    fn test_zero_mean_difference() {
        let result = paired(&[1.0, 2.0, 3.0, 4.0], &[2.0, 1.0, 5.0, 2.0]).unwrap();
        assert_eq!(result.statistic, 0.0);
        assert!((result.p_value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unequal_lengths() {
        assert_eq!(
            paired(&[1.0, 2.0], &[1.0]),
            Err(StatError::UnequalLength { left: 2, right: 1 })
        );
    }

    #[test]
    fn test_single_pair() {
        assert_eq!(
            paired(&[1.0], &[2.0]),
            Err(StatError::InsufficientData { needed: 2, got: 1 })
        );
    }

    #[test]
    fn test_constant_differences() {
        assert_eq!(
            paired(&[1.0, 2.0, 3.0], &[2.0, 3.0, 4.0]),
            Err(StatError::DegenerateVariance)
        );
    }
}

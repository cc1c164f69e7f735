//! Chi-square goodness-of-fit against a uniform expectation.

use statrs::function::gamma::gamma_ur;

use crate::{descriptive, error::StatError};

/// Outcome of a chi-square goodness-of-fit test.
#[derive(Debug, Clone, PartialEq)]
pub struct ChiSquareFit {
    /// The chi-square statistic Σ(observed − expected)² / expected.
    pub statistic: f64,
    /// Degrees of freedom (n − 1).
    pub df: f64,
    /// Upper-tail p-value.
    pub p_value: f64,
}

/// Tests observed frequencies against a uniform expected distribution.
///
/// The expected frequency for every observation is the mean of the
/// observed values, so a perfectly uniform input yields a statistic of 0
/// and a p-value of 1. The p-value is the chi-square upper-tail
/// probability, computed as the regularized upper incomplete gamma
/// function at `(df/2, statistic/2)`.
///
/// # Errors
///
/// * [`StatError::InsufficientData`] - fewer than two observations
/// * [`StatError::DegenerateVariance`] - the expected frequency is not
///   strictly positive
///
/// # Examples
///
/// ```
/// use codesurvey_stats::chi_square;
///
/// let fit = chi_square::uniform_fit(&[2.0, 2.0, 2.0]).unwrap();
/// assert_eq!(fit.statistic, 0.0);
/// assert!((fit.p_value - 1.0).abs() < 1e-12);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn uniform_fit(observed: &[f64]) -> Result<ChiSquareFit, StatError> {
    let n = observed.len();
    if n < 2 {
        return Err(StatError::InsufficientData { needed: 2, got: n });
    }
    let expected = descriptive::mean(observed).ok_or(StatError::InsufficientData {
        needed: 2,
        got: n,
    })?;
    if expected <= 0.0 {
        return Err(StatError::DegenerateVariance);
    }

    let statistic = observed
        .iter()
        .map(|o| (o - expected).powi(2) / expected)
        .sum::<f64>();
    let df = (n - 1) as f64;
    let p_value = gamma_ur(df / 2.0, statistic / 2.0).clamp(0.0, 1.0);

    Ok(ChiSquareFit {
        statistic,
        df,
        p_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_observation() {
        let fit = uniform_fit(&[4.0, 4.0, 4.0, 4.0, 4.0]).unwrap();
        assert_eq!(fit.statistic, 0.0);
        assert_eq!(fit.df, 4.0);
        assert!((fit.p_value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_known_statistic() {
        // mean = 2, statistic = (1 + 0 + 1 + 0 + 0) / 2 = 1, df = 4;
        // gammaincc(2, 0.5) = e^{-0.5} * 1.5.
        let fit = uniform_fit(&[1.0, 2.0, 3.0, 2.0, 2.0]).unwrap();
        assert!((fit.statistic - 1.0).abs() < 1e-12);
        assert!((fit.p_value - 0.909_795_989_568_950_1).abs() < 1e-9);
    }

    #[test]
    fn test_too_few_observations() {
        assert_eq!(
            uniform_fit(&[1.0]),
            Err(StatError::InsufficientData { needed: 2, got: 1 })
        );
    }

    #[test]
    fn test_zero_expected_frequency() {
        assert_eq!(
            uniform_fit(&[0.0, 0.0, 0.0]),
            Err(StatError::DegenerateVariance)
        );
    }
}

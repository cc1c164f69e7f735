//! Descriptive statistics over `f64` datasets.

/// Arithmetic mean of a dataset.
///
/// # Returns
///
/// * `Some(mean)` - if the dataset contains at least one value
/// * `None` - if the dataset is empty
///
/// # Examples
///
/// ```
/// use codesurvey_stats::descriptive;
///
/// assert_eq!(descriptive::mean(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(descriptive::mean(&[]), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Unbiased sample variance (n − 1 denominator).
///
/// # Returns
///
/// * `Some(variance)` - if the dataset contains at least two values
/// * `None` - otherwise
///
/// # Examples
///
/// ```
/// use codesurvey_stats::descriptive;
///
/// assert_eq!(descriptive::sample_variance(&[1.0, 3.0]), Some(2.0));
/// assert_eq!(descriptive::sample_variance(&[1.0]), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    Some(sum_sq / (values.len() - 1) as f64)
}

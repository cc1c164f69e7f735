//! Multiple-testing p-value adjustment.

/// Holm step-down adjustment of a family of p-values.
///
/// Returns the adjusted p-values in the input order. Each sorted p-value
/// is scaled by its step-down factor, running maxima enforce
/// monotonicity, and results are clamped at 1.0. A singleton family is
/// returned unchanged (the degenerate case used when a single pairwise
/// comparison is corrected for interface symmetry).
///
/// # Examples
///
/// ```
/// use codesurvey_stats::multitest;
///
/// let adjusted = multitest::holm_adjust(&[0.01, 0.04, 0.03]);
/// assert_eq!(adjusted, vec![0.03, 0.06, 0.06]);
///
/// assert_eq!(multitest::holm_adjust(&[0.2]), vec![0.2]);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn holm_adjust(p_values: &[f64]) -> Vec<f64> {
    let m = p_values.len();
    let mut order = (0..m).collect::<Vec<_>>();
    order.sort_by(|&a, &b| p_values[a].total_cmp(&p_values[b]));

    let mut adjusted = vec![0.0; m];
    let mut running_max = 0.0_f64;
    for (rank, &index) in order.iter().enumerate() {
        let scaled = ((m - rank) as f64 * p_values[index]).min(1.0);
        running_max = running_max.max(scaled);
        adjusted[index] = running_max;
    }
    adjusted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singleton_is_identity() {
        assert_eq!(holm_adjust(&[0.037]), vec![0.037]);
    }

    #[test]
    fn test_step_down_scaling() {
        assert_eq!(holm_adjust(&[0.01, 0.04, 0.03]), vec![0.03, 0.06, 0.06]);
    }

    #[test]
    fn test_clamped_at_one() {
        assert_eq!(holm_adjust(&[0.9, 0.8]), vec![1.0, 1.0]);
    }

    #[test]
    fn test_empty_family() {
        assert!(holm_adjust(&[]).is_empty());
    }
}

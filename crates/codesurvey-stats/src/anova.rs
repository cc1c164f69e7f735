//! Randomized-complete-block one-way ANOVA.

use std::collections::{BTreeMap, BTreeSet};

use statrs::distribution::{ContinuousCDF, FisherSnedecor};

use crate::error::StatError;

/// Outcome of a block ANOVA.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockAnova {
    /// F statistic for the treatment factor.
    pub f_statistic: f64,
    /// Treatment degrees of freedom (k − 1).
    pub df_treatment: f64,
    /// Error degrees of freedom ((b − 1)(k − 1)).
    pub df_error: f64,
    /// Upper-tail p-value for the treatment factor.
    pub p_value: f64,
}

/// Tests for a treatment effect while controlling for a blocking factor.
///
/// Observations are `(treatment, block, value)` triples; in the survey
/// setting the treatment is the code sample and the block is the user.
/// Replicated observations within a cell are averaged, and blocks missing
/// any treatment are dropped, so the decomposition always runs on a
/// complete balanced layout:
///
/// ```text
/// SS_total = SS_treatment + SS_block + SS_error
/// F = (SS_treatment / (k − 1)) / (SS_error / ((b − 1)(k − 1)))
/// ```
///
/// # Errors
///
/// * [`StatError::InsufficientData`] - fewer than two treatments, or
///   fewer than two complete blocks
/// * [`StatError::DegenerateVariance`] - the residual variance is zero
///   (the model fits the data exactly)
pub fn block_anova<T, B>(
    observations: impl IntoIterator<Item = (T, B, f64)>,
) -> Result<BlockAnova, StatError>
where
    T: Ord + Clone,
    B: Ord,
{
    let mut treatments = BTreeSet::new();
    let mut cells: BTreeMap<B, BTreeMap<T, (f64, u64)>> = BTreeMap::new();
    for (treatment, block, value) in observations {
        let cell = cells
            .entry(block)
            .or_default()
            .entry(treatment)
            .or_insert((0.0, 0));
        cell.0 += value;
        cell.1 += 1;
    }
    for block in cells.values() {
        treatments.extend(block.keys().cloned());
    }
    let k = treatments.len();
    if k < 2 {
        return Err(StatError::InsufficientData { needed: 2, got: k });
    }

    // Complete-case layout: drop blocks missing any treatment, average
    // replicates within a cell.
    #[expect(clippy::cast_precision_loss)]
    let rows = cells
        .values()
        .filter(|block| block.len() == k)
        .map(|block| {
            block
                .values()
                .map(|&(sum, count)| sum / count as f64)
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    let b = rows.len();
    if b < 2 {
        return Err(StatError::InsufficientData { needed: 2, got: b });
    }

    #[expect(clippy::cast_precision_loss)]
    let (b_f, k_f) = (b as f64, k as f64);
    let grand_mean = rows.iter().flatten().sum::<f64>() / (b_f * k_f);
    let treatment_means = (0..k)
        .map(|j| rows.iter().map(|row| row[j]).sum::<f64>() / b_f)
        .collect::<Vec<_>>();
    let block_means = rows
        .iter()
        .map(|row| row.iter().sum::<f64>() / k_f)
        .collect::<Vec<_>>();

    let ss_treatment = b_f
        * treatment_means
            .iter()
            .map(|m| (m - grand_mean).powi(2))
            .sum::<f64>();
    let ss_block = k_f
        * block_means
            .iter()
            .map(|m| (m - grand_mean).powi(2))
            .sum::<f64>();
    let ss_total = rows
        .iter()
        .flatten()
        .map(|v| (v - grand_mean).powi(2))
        .sum::<f64>();
    let ss_error = ss_total - ss_treatment - ss_block;

    let df_treatment = k_f - 1.0;
    let df_error = (b_f - 1.0) * (k_f - 1.0);
    let ms_error = ss_error / df_error;
    if ms_error <= 0.0 || ms_error.is_nan() {
        return Err(StatError::DegenerateVariance);
    }

    let f_statistic = (ss_treatment / df_treatment) / ms_error;
    let distribution = FisherSnedecor::new(df_treatment, df_error)
        .map_err(|_| StatError::DegenerateVariance)?;
    let p_value = (1.0 - distribution.cdf(f_statistic)).clamp(0.0, 1.0);

    Ok(BlockAnova {
        f_statistic,
        df_treatment,
        df_error,
        p_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observations(rows: &[[f64; 3]]) -> Vec<(usize, usize, f64)> {
        rows.iter()
            .enumerate()
            .flat_map(|(block, row)| {
                row.iter()
                    .enumerate()
                    .map(move |(treatment, &value)| (treatment, block, value))
            })
            .collect()
    }

    #[test]
    fn test_known_decomposition() {
        // 4 blocks x 3 treatments; SS_treatment = 91/6, SS_error = 5/6,
        // F = 54.6, p = (1 + 2F/6)^{-3}.
        let rows = [
            [1.0, 2.0, 4.0],
            [2.0, 3.0, 5.0],
            [1.0, 2.0, 3.0],
            [2.0, 4.0, 5.0],
        ];
        let result = block_anova(observations(&rows)).unwrap();
        assert_eq!(result.df_treatment, 2.0);
        assert_eq!(result.df_error, 6.0);
        assert!((result.f_statistic - 54.6).abs() < 1e-9);
        assert!((result.p_value - 1.412_850_839_120_355_5e-4).abs() < 1e-12);
    }

    #[test]
    fn test_incomplete_block_dropped() {
        let rows = [
            [1.0, 2.0, 4.0],
            [2.0, 3.0, 5.0],
            [1.0, 2.0, 3.0],
            [2.0, 4.0, 5.0],
        ];
        let mut data = observations(&rows);
        // A fifth block that only saw treatments 0 and 1 must not
        // influence the fit.
        data.push((0, 4, 9.0));
        data.push((1, 4, 9.0));
        let with_partial = block_anova(data).unwrap();
        let without = block_anova(observations(&rows)).unwrap();
        assert!((with_partial.f_statistic - without.f_statistic).abs() < 1e-12);
        assert!((with_partial.p_value - without.p_value).abs() < 1e-12);
    }

    #[test]
    fn test_replicates_are_averaged() {
        let rows = [
            [1.0, 2.0, 4.0],
            [2.0, 3.0, 5.0],
            [1.0, 2.0, 3.0],
            [2.0, 4.0, 5.0],
        ];
        let mut data = observations(&rows);
        // Duplicate an observation; the cell mean is unchanged.
        data.push((0, 0, 1.0));
        let with_replicate = block_anova(data).unwrap();
        let without = block_anova(observations(&rows)).unwrap();
        assert!((with_replicate.f_statistic - without.f_statistic).abs() < 1e-12);
    }

    #[test]
    fn test_single_treatment() {
        let data = vec![(0usize, 0usize, 1.0), (0, 1, 2.0)];
        assert_eq!(
            block_anova(data),
            Err(StatError::InsufficientData { needed: 2, got: 1 })
        );
    }

    #[test]
    fn test_single_complete_block() {
        let data = vec![(0usize, 0usize, 1.0), (1, 0, 2.0), (0, 1, 3.0)];
        assert_eq!(
            block_anova(data),
            Err(StatError::InsufficientData { needed: 2, got: 1 })
        );
    }

    #[test]
    fn test_perfectly_additive_data() {
        // value = block + treatment leaves no residual variance.
        let data = (0..3)
            .flat_map(|block| (0..3).map(move |t| (t, block, (block + t) as f64)))
            .collect::<Vec<_>>();
        assert_eq!(block_anova(data), Err(StatError::DegenerateVariance));
    }
}

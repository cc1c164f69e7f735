//! Statistical procedures for the codesurvey project.
//!
//! This crate provides the numerical building blocks used when comparing
//! code samples across survey responses:
//!
//! - **Descriptive statistics**: mean and sample variance over `f64` slices
//! - **Paired t-test**: two-sided test over positionally paired samples
//! - **Block ANOVA**: randomized-complete-block one-way ANOVA (treatment
//!   effect with a blocking factor)
//! - **Chi-square goodness-of-fit**: observed frequencies against a
//!   uniform (mean-of-observed) expectation
//! - **Friedman test**: rank test across related samples, with tie
//!   correction
//! - **Holm adjustment**: step-down multiple-testing correction
//!
//! All procedures are survey-vocabulary free: they consume plain numeric
//! data and report failures (too few observations, degenerate variance)
//! as typed [`StatError`](error::StatError) values instead of panicking,
//! so a caller can downgrade any individual failure to a missing result.
//!
//! # Modules
//!
//! - [`descriptive`]: Means and variances
//! - [`ttest`]: Paired t-test
//! - [`anova`]: Block ANOVA
//! - [`chi_square`]: Chi-square goodness-of-fit
//! - [`friedman`]: Friedman rank test
//! - [`multitest`]: Multiple-testing p-value adjustment
//!
//! # Examples
//!
//! ## Paired t-test
//!
//! ```
//! use codesurvey_stats::ttest;
//!
//! let first = [3.0, 1.0, 2.0, 4.0, 2.0];
//! let second = [2.0, 1.0, 4.0, 5.0, 4.0];
//! let result = ttest::paired(&first, &second).unwrap();
//! assert!(result.p_value > 0.0 && result.p_value < 1.0);
//! ```
//!
//! ## Chi-square against a uniform expectation
//!
//! ```
//! use codesurvey_stats::chi_square;
//!
//! // A perfectly uniform observation yields statistic 0 and p-value 1.
//! let fit = chi_square::uniform_fit(&[2.0, 2.0, 2.0, 2.0]).unwrap();
//! assert_eq!(fit.statistic, 0.0);
//! assert!((fit.p_value - 1.0).abs() < 1e-12);
//! ```

pub mod anova;
pub mod chi_square;
pub mod descriptive;
pub mod error;
pub mod friedman;
pub mod multitest;
pub mod ttest;

pub use error::StatError;

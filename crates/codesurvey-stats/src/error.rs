//! Failure modes shared by the statistical procedures.

/// A reason a statistical procedure could not produce a result.
///
/// These cover the numerical failures expected from each procedure;
/// callers typically map any of them to a missing (null) result rather
/// than aborting a whole report.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StatError {
    /// Too few observations, groups or complete cases.
    #[display("not enough observations: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },
    /// Paired samples (or pivot rows) differ in length.
    #[display("paired samples have different lengths ({left} vs {right})")]
    UnequalLength { left: usize, right: usize },
    /// The data carries no usable variance (e.g. identical differences,
    /// a zero expected frequency, or a fully tied ranking).
    #[display("observations are degenerate: no usable variance")]
    DegenerateVariance,
}

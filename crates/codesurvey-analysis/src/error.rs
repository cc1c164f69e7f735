//! Error types for the cleaning/aggregation/testing pipeline.

/// A strategy could not be selected for a question.
///
/// Configuration errors are fatal to the question being processed and
/// are never silently defaulted. Once a strategy enum is constructed it
/// is immutable, so "strategy not set" is unrepresentable after a
/// successful constructor call; the only configuration failure left is
/// an unrecognized question type at selection time.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigurationError {
    #[display("unrecognized question type {kind} on question {question_id}")]
    UnrecognizedQuestionType { question_id: i64, kind: u8 },
}

/// The input data could not be shaped for the selected strategy.
///
/// Unlike statistical failures (which are recovered into null result
/// fields), data errors indicate the caller handed a table or answer set
/// that the selected strategy cannot legally consume.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DataError {
    /// The table variant does not match the selected strategy.
    #[display("table variant {got} does not match the selected strategy (expected {expected})")]
    TableMismatch {
        expected: &'static str,
        got: &'static str,
    },
    /// The strategy requires at least one row.
    #[display("empty table where at least one row is required")]
    EmptyTable,
    /// A ranking answer did not reference a placeholder.
    #[display("ranking answer is missing a placeholder id")]
    MissingPlaceholderId,
    /// A choice answer did not reference an attribute.
    #[display("choice answer is missing an attribute id")]
    MissingAttributeId,
    /// A ranking answer referenced a placeholder the question does not own.
    #[display("answer references unknown placeholder {placeholder_id}")]
    UnknownPlaceholder { placeholder_id: i64 },
    /// An answer that must carry a payload carried none.
    #[display("answer is missing a value")]
    MissingValue,
    /// An ordering answer's value could not be coerced to an integer.
    #[display("ordering value {value:?} is not an integral number")]
    NonNumericOrder { value: String },
    /// The aggregator needs a target attribute but none was supplied.
    #[display("aggregation requires an attribute")]
    MissingAttribute,
    /// The aggregator needs a target code sample but none was supplied.
    #[display("aggregation requires a code sample")]
    MissingCodeSample,
    /// An entity lacks the translation a result field needs.
    #[display("missing {key:?} translation")]
    MissingTranslation { key: &'static str },
}

/// Any failure while assembling an aggregated report.
#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum ReportError {
    #[display("{_0}")]
    Configuration(ConfigurationError),
    #[display("{_0}")]
    Data(DataError),
}

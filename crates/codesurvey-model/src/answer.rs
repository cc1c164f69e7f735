//! Raw per-user answer records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The type-dependent payload of a raw answer.
///
/// Type-2 answers carry free text, type-3 answers carry a truthy flag,
/// type-4 answers carry an ordinal position. Survey exports are not
/// strict about the JSON type used for each, so the coercion helpers
/// accept all three representations.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl AnswerValue {
    /// Truthiness used by the type-3 row filter: `false`, `0` and the
    /// empty string are falsy, everything else is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(flag) => *flag,
            Self::Number(number) => *number != 0.0,
            Self::Text(text) => !text.is_empty(),
        }
    }

    /// Numeric coercion; booleans map to 0/1, text is parsed.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
            Self::Number(number) => Some(*number),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }

    /// Integer coercion for ordinal values; fractional numbers fail.
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Bool(flag) => Some(i64::from(*flag)),
            Self::Number(number) if number.fract() == 0.0 && number.is_finite() => {
                Some(*number as i64)
            }
            Self::Number(_) => None,
            Self::Text(text) => text.trim().parse().ok(),
        }
    }

    /// The textual form of the value, for type-2 free-text answers.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Bool(flag) => flag.to_string(),
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

/// One raw answer row, one per user-response-unit.
///
/// Which optional fields are populated depends on the question type:
/// type 1 sets `placeholder_id`, type 3 with attributes sets
/// `attribute_id`, and `value` carries the payload for types 2-4.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawAnswer {
    pub user_id: Uuid,
    pub code_sample_id: i64,
    #[serde(default)]
    pub placeholder_id: Option<i64>,
    #[serde(default)]
    pub attribute_id: Option<i64>,
    #[serde(default)]
    pub value: Option<AnswerValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(AnswerValue::Bool(true).is_truthy());
        assert!(!AnswerValue::Bool(false).is_truthy());
        assert!(AnswerValue::Number(2.0).is_truthy());
        assert!(!AnswerValue::Number(0.0).is_truthy());
        assert!(AnswerValue::Text("x".into()).is_truthy());
        assert!(!AnswerValue::Text(String::new()).is_truthy());
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(AnswerValue::Text("2.5".into()).as_f64(), Some(2.5));
        assert_eq!(AnswerValue::Text("abc".into()).as_f64(), None);
        assert_eq!(AnswerValue::Number(3.0).as_i64(), Some(3));
        assert_eq!(AnswerValue::Number(3.5).as_i64(), None);
        assert_eq!(AnswerValue::Text("4".into()).as_i64(), Some(4));
        assert_eq!(AnswerValue::Bool(true).as_f64(), Some(1.0));
    }

    #[test]
    fn test_untagged_deserialization() {
        let answer: RawAnswer = serde_json::from_str(
            r#"{
                "user_id": "00000000-0000-0000-0000-000000000001",
                "code_sample_id": 7,
                "value": 2
            }"#,
        )
        .unwrap();
        assert_eq!(answer.code_sample_id, 7);
        assert_eq!(answer.value, Some(AnswerValue::Number(2.0)));
        assert_eq!(answer.placeholder_id, None);
    }
}

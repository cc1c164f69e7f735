//! Questions, attributes and placeholders.

use serde::{Deserialize, Serialize};

use crate::translation::Translation;

/// A survey question.
///
/// `kind` is kept as the raw question-type discriminant (1 = ranking,
/// 2 = free text, 3 = choice, 4 = ordering). Strategy selection in the
/// analysis layer is the single place that interprets it, so an
/// unrecognized type surfaces as a configuration error there instead of
/// being rejected (or silently mangled) during deserialization.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Question {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: u8,
    pub order: i64,
    pub multiple: bool,
    pub triangle: bool,
    pub discrete: bool,
    pub required: bool,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub translations: Vec<Translation>,
}

impl Question {
    /// Whether the question carries categorical attributes.
    ///
    /// Attribute presence changes which cleaning, aggregation and
    /// significance-test strategies apply to type-3 questions.
    #[must_use]
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Looks up a placeholder across all of the question's attributes.
    #[must_use]
    pub fn find_placeholder(&self, placeholder_id: i64) -> Option<&Placeholder> {
        self.attributes
            .iter()
            .flat_map(|attribute| attribute.placeholders.iter())
            .find(|placeholder| placeholder.id == placeholder_id)
    }
}

/// A categorical tag attached to a question, used for type-3 grouping
/// and as the owner of type-1 placeholders.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Attribute {
    pub id: i64,
    pub order: i64,
    #[serde(default)]
    pub placeholders: Vec<Placeholder>,
    #[serde(default)]
    pub translations: Vec<Translation>,
}

/// A sub-slot within a type-1 (ranking) question.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Placeholder {
    pub id: i64,
    pub order: i64,
    #[serde(default)]
    pub translations: Vec<Translation>,
}

/// A group of questions presented together.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Section {
    pub id: i64,
    pub repeated_by_sample: bool,
    pub order: i64,
    #[serde(default)]
    pub questions: Vec<Question>,
}

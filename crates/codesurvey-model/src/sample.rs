//! Code samples being compared by the survey.

use serde::{Deserialize, Serialize};

use crate::translation::Translation;

/// The logical sample a code sample variant belongs to.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Sample {
    pub id: i64,
    pub name: String,
}

/// A concrete code sample variant shown to survey users.
///
/// The sample body itself lives in the translation list under the
/// `code` key, since the same sample may be shown in several languages.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CodeSample {
    pub id: i64,
    pub sample_id: i64,
    pub sample: Sample,
    #[serde(default)]
    pub translations: Vec<Translation>,
}

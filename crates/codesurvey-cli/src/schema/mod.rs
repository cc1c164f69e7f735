//! On-disk schema of a survey export.

use std::collections::BTreeMap;

use codesurvey_model::{CodeSample, RawAnswer, Section};
use serde::Deserialize;

/// The survey export consumed by the `report` command.
///
/// `answers` maps question ids to that question's raw answer rows;
/// question ids absent from the map simply have no responses.
#[derive(Debug, Clone, Deserialize)]
pub struct SurveyExport {
    pub selected_lang: String,
    pub sections: Vec<Section>,
    pub code_samples: Vec<CodeSample>,
    #[serde(default)]
    pub answers: BTreeMap<i64, Vec<RawAnswer>>,
}

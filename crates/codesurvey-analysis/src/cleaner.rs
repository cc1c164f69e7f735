//! Cleaning strategies: raw answers into typed tables.
//!
//! Each question type maps to exactly one cleaning strategy, selected
//! once when a [`CleanData`] is constructed and immutable afterward.
//! Cleaning never drops rows except for the truthiness filter of the
//! type-3 strategies, so downstream row counts can be reasoned about
//! from the raw answer count.

use codesurvey_model::{AnswerValue, Question, RawAnswer, get_translation};

use crate::{
    error::{ConfigurationError, DataError},
    table::{AttributeChoiceRow, CleanTable, FreeTextRow, OrderingRow, RankingRow, SampleChoiceRow},
};

/// The closed set of cleaning strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanerKind {
    /// Type 1: placeholder rankings.
    Ranking,
    /// Type 2: free text.
    FreeText,
    /// Type 3 with attributes: truthy attribute selections.
    AttributeChoice,
    /// Type 3 without attributes: truthy code-sample selections.
    SampleChoice,
    /// Type 4: ordinal ordering of code samples.
    Ordering,
}

/// Selects the cleaning strategy for a question.
///
/// The mapping is total over the four recognized question types; any
/// other type is a [`ConfigurationError`], never a silent default.
pub fn select_cleaner(question: &Question) -> Result<CleanerKind, ConfigurationError> {
    match question.kind {
        1 => Ok(CleanerKind::Ranking),
        2 => Ok(CleanerKind::FreeText),
        3 if question.has_attributes() => Ok(CleanerKind::AttributeChoice),
        3 => Ok(CleanerKind::SampleChoice),
        4 => Ok(CleanerKind::Ordering),
        kind => Err(ConfigurationError::UnrecognizedQuestionType {
            question_id: question.id,
            kind,
        }),
    }
}

/// Owns the cleaning strategy for one question (and optionally one
/// attribute) and turns raw answers into a [`CleanTable`].
#[derive(Debug, Clone)]
pub struct CleanData<'q> {
    question: &'q Question,
    attribute_id: Option<i64>,
    cleaner: CleanerKind,
}

impl<'q> CleanData<'q> {
    /// Creates a `CleanData` with the strategy selected from the question.
    pub fn new(
        question: &'q Question,
        attribute_id: Option<i64>,
    ) -> Result<Self, ConfigurationError> {
        let cleaner = select_cleaner(question)?;
        Ok(Self::with_cleaner(question, attribute_id, cleaner))
    }

    /// Creates a `CleanData` with an explicitly injected strategy.
    #[must_use]
    pub fn with_cleaner(
        question: &'q Question,
        attribute_id: Option<i64>,
        cleaner: CleanerKind,
    ) -> Self {
        Self {
            question,
            attribute_id,
            cleaner,
        }
    }

    /// The strategy selected at construction.
    #[must_use]
    pub fn cleaner(&self) -> CleanerKind {
        self.cleaner
    }

    /// The attribute this instance was scoped to, if any.
    #[must_use]
    pub fn attribute_id(&self) -> Option<i64> {
        self.attribute_id
    }

    /// Runs the selected strategy over raw answers.
    ///
    /// Idempotent: the same answers produce the same table. The output
    /// row count equals the input answer count, minus falsy-valued rows
    /// for the type-3 strategies.
    pub fn execute_cleaner(
        &self,
        answers: &[RawAnswer],
        selected_lang: &str,
    ) -> Result<CleanTable, DataError> {
        match self.cleaner {
            CleanerKind::Ranking => self.clean_ranking(answers, selected_lang),
            CleanerKind::FreeText => clean_free_text(answers),
            CleanerKind::AttributeChoice => clean_attribute_choice(answers),
            CleanerKind::SampleChoice => Ok(clean_sample_choice(answers)),
            CleanerKind::Ordering => clean_ordering(answers),
        }
    }

    fn clean_ranking(
        &self,
        answers: &[RawAnswer],
        selected_lang: &str,
    ) -> Result<CleanTable, DataError> {
        let mut rows = Vec::with_capacity(answers.len());
        for answer in answers {
            let placeholder_id = answer
                .placeholder_id
                .ok_or(DataError::MissingPlaceholderId)?;
            let placeholder = self
                .question
                .find_placeholder(placeholder_id)
                .ok_or(DataError::UnknownPlaceholder { placeholder_id })?;
            let name = get_translation(&placeholder.translations, "name", selected_lang)
                .ok_or(DataError::MissingTranslation { key: "name" })?;
            rows.push(RankingRow {
                user_id: answer.user_id,
                placeholder_id,
                placeholder_order: placeholder.order,
                placeholder_name: name.value.clone(),
                code_sample_id: answer.code_sample_id,
            });
        }
        Ok(CleanTable::Ranking(rows))
    }
}

fn clean_free_text(answers: &[RawAnswer]) -> Result<CleanTable, DataError> {
    let rows = answers
        .iter()
        .map(|answer| {
            let value = answer.value.as_ref().ok_or(DataError::MissingValue)?;
            Ok(FreeTextRow {
                user_id: answer.user_id,
                value: value.as_text(),
                code_sample_id: answer.code_sample_id,
            })
        })
        .collect::<Result<Vec<_>, DataError>>()?;
    Ok(CleanTable::FreeText(rows))
}

fn clean_attribute_choice(answers: &[RawAnswer]) -> Result<CleanTable, DataError> {
    let mut rows = Vec::new();
    for answer in answers {
        if !answer.value.as_ref().is_some_and(AnswerValue::is_truthy) {
            continue;
        }
        let attribute_id = answer.attribute_id.ok_or(DataError::MissingAttributeId)?;
        rows.push(AttributeChoiceRow {
            user_id: answer.user_id,
            attribute_id,
            code_sample_id: answer.code_sample_id,
        });
    }
    Ok(CleanTable::AttributeChoice(rows))
}

fn clean_sample_choice(answers: &[RawAnswer]) -> CleanTable {
    let rows = answers
        .iter()
        .filter(|answer| answer.value.as_ref().is_some_and(AnswerValue::is_truthy))
        .map(|answer| SampleChoiceRow {
            user_id: answer.user_id,
            code_sample_id: answer.code_sample_id,
        })
        .collect();
    CleanTable::SampleChoice(rows)
}

fn clean_ordering(answers: &[RawAnswer]) -> Result<CleanTable, DataError> {
    let rows = answers
        .iter()
        .map(|answer| {
            let value = answer.value.as_ref().ok_or(DataError::MissingValue)?;
            let order = value.as_i64().ok_or_else(|| DataError::NonNumericOrder {
                value: value.as_text(),
            })?;
            Ok(OrderingRow {
                user_id: answer.user_id,
                code_sample_id: answer.code_sample_id,
                order,
            })
        })
        .collect::<Result<Vec<_>, DataError>>()?;
    Ok(CleanTable::Ordering(rows))
}

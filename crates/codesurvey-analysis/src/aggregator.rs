//! Aggregation strategies: typed tables into per-question summaries.

use std::collections::BTreeMap;

use codesurvey_model::{Attribute, CodeSample, Placeholder, Question, get_translation};
use codesurvey_stats::descriptive;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::{ConfigurationError, DataError},
    table::{CleanTable, RankingRow},
};

/// The closed set of aggregation strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregatorKind {
    /// Type 1: mean placeholder order/value plus per-placeholder counts.
    Ranking,
    /// Type 2: single free-text response taken verbatim.
    FreeText,
    /// Type 3 with attributes: count and share of users per attribute.
    AttributeChoice,
    /// Type 3 without attributes: count and share of users per code sample.
    SampleChoice,
    /// Type 4: order histogram and weighted order.
    Ordering,
}

/// Selects the aggregation strategy for a question.
pub fn select_aggregator(question: &Question) -> Result<AggregatorKind, ConfigurationError> {
    match question.kind {
        1 => Ok(AggregatorKind::Ranking),
        2 => Ok(AggregatorKind::FreeText),
        3 if question.has_attributes() => Ok(AggregatorKind::AttributeChoice),
        3 => Ok(AggregatorKind::SampleChoice),
        4 => Ok(AggregatorKind::Ordering),
        kind => Err(ConfigurationError::UnrecognizedQuestionType {
            question_id: question.id,
            kind,
        }),
    }
}

/// Per-placeholder summary nested under a type-1 aggregated answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedPlaceholder {
    pub id: i64,
    pub order: i64,
    pub placeholder_name: String,
    pub placeholder_lang: String,
    pub n: u64,
    pub percent: f64,
}

impl AggregatedPlaceholder {
    #[expect(clippy::cast_precision_loss)]
    fn from_rows(
        placeholder: &Placeholder,
        selected_lang: &str,
        rows: &[RankingRow],
    ) -> Result<Self, DataError> {
        let translation = get_translation(&placeholder.translations, "name", selected_lang)
            .ok_or(DataError::MissingTranslation { key: "name" })?;
        let n = rows
            .iter()
            .filter(|row| row.placeholder_id == placeholder.id)
            .count() as u64;
        let percent = if rows.is_empty() {
            0.0
        } else {
            n as f64 / rows.len() as f64 * 100.0
        };
        Ok(Self {
            id: placeholder.id,
            order: placeholder.order,
            placeholder_name: translation.value.clone(),
            placeholder_lang: translation.lang.clone(),
            n,
            percent,
        })
    }
}

/// The per-question (optionally per-attribute / per-code-sample) summary.
///
/// Only the fields relevant to the selected strategy are populated; the
/// rest serialize as null. Context fields (attribute and code-sample
/// identity) are filled by the report assembly, not by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedAnswer {
    pub attribute_id: Option<i64>,
    pub attribute_order: Option<i64>,
    pub attribute_name: Option<String>,
    pub attribute_lang: Option<String>,
    pub user_id: Option<Uuid>,
    pub code_sample_id: Option<i64>,
    pub sample_id: Option<i64>,
    pub n: Option<u64>,
    pub percent: Option<f64>,
    pub text: Option<String>,
    pub mean_order: Option<f64>,
    pub mean_value: Option<f64>,
    pub order: Option<BTreeMap<i64, u64>>,
    pub weighted_order: Option<f64>,
    pub placeholders: Vec<AggregatedPlaceholder>,
    #[serde(skip)]
    aggregator: AggregatorKind,
}

impl AggregatedAnswer {
    /// Creates an answer with the strategy selected from the question.
    pub fn new(question: &Question) -> Result<Self, ConfigurationError> {
        Ok(Self::with_aggregator(select_aggregator(question)?))
    }

    /// Creates an answer with an explicitly injected strategy.
    #[must_use]
    pub fn with_aggregator(aggregator: AggregatorKind) -> Self {
        Self {
            attribute_id: None,
            attribute_order: None,
            attribute_name: None,
            attribute_lang: None,
            user_id: None,
            code_sample_id: None,
            sample_id: None,
            n: None,
            percent: None,
            text: None,
            mean_order: None,
            mean_value: None,
            order: None,
            weighted_order: None,
            placeholders: Vec::new(),
            aggregator,
        }
    }

    /// The strategy selected at construction.
    #[must_use]
    pub fn aggregator(&self) -> AggregatorKind {
        self.aggregator
    }

    /// Runs the selected strategy, filling this answer's output fields.
    ///
    /// Idempotent for a given table; statistical degeneracies (empty
    /// means, unparsable placeholder names) leave the affected field
    /// null instead of failing.
    pub fn execute_aggregator(
        &mut self,
        table: &CleanTable,
        selected_lang: &str,
        attribute: Option<&Attribute>,
        code_sample: Option<&CodeSample>,
    ) -> Result<(), DataError> {
        match self.aggregator {
            AggregatorKind::Ranking => {
                let rows = ranking_rows(table)?;
                let attribute = attribute.ok_or(DataError::MissingAttribute)?;
                self.aggregate_ranking(rows, selected_lang, attribute)
            }
            AggregatorKind::FreeText => {
                let CleanTable::FreeText(rows) = table else {
                    return Err(mismatch("free_text", table));
                };
                let first = rows.first().ok_or(DataError::EmptyTable)?;
                self.text = Some(first.value.clone());
                self.user_id = Some(first.user_id);
                Ok(())
            }
            AggregatorKind::AttributeChoice => {
                let CleanTable::AttributeChoice(rows) = table else {
                    return Err(mismatch("attribute_choice", table));
                };
                let attribute = attribute.ok_or(DataError::MissingAttribute)?;
                let matching = rows
                    .iter()
                    .filter(|row| row.attribute_id == attribute.id)
                    .count();
                self.set_share(matching, table.distinct_user_count());
                Ok(())
            }
            AggregatorKind::SampleChoice => {
                let CleanTable::SampleChoice(rows) = table else {
                    return Err(mismatch("sample_choice", table));
                };
                let code_sample = code_sample.ok_or(DataError::MissingCodeSample)?;
                let matching = rows
                    .iter()
                    .filter(|row| row.code_sample_id == code_sample.id)
                    .count();
                self.set_share(matching, table.distinct_user_count());
                Ok(())
            }
            AggregatorKind::Ordering => {
                let CleanTable::Ordering(rows) = table else {
                    return Err(mismatch("ordering", table));
                };
                let mut histogram: BTreeMap<i64, u64> = BTreeMap::new();
                for row in rows {
                    *histogram.entry(row.order).or_insert(0) += 1;
                }
                #[expect(clippy::cast_precision_loss)]
                let weighted = histogram
                    .iter()
                    .map(|(&value, &count)| value as f64 * count as f64)
                    .sum::<f64>();
                self.order = Some(histogram);
                self.weighted_order = Some(weighted);
                Ok(())
            }
        }
    }

    #[expect(clippy::cast_precision_loss)]
    fn aggregate_ranking(
        &mut self,
        rows: &[RankingRow],
        selected_lang: &str,
        attribute: &Attribute,
    ) -> Result<(), DataError> {
        let orders = rows
            .iter()
            .map(|row| row.placeholder_order as f64)
            .collect::<Vec<_>>();
        self.mean_order = descriptive::mean(&orders);

        // A placeholder name is often a numeric label; when every name
        // parses, their mean is reported, otherwise the field stays null.
        let values = rows
            .iter()
            .map(|row| row.placeholder_name.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>();
        self.mean_value = values.ok().as_deref().and_then(descriptive::mean);

        for placeholder in &attribute.placeholders {
            self.placeholders.push(AggregatedPlaceholder::from_rows(
                placeholder,
                selected_lang,
                rows,
            )?);
        }
        Ok(())
    }

    /// Count plus share of distinct users; zero users means zero share.
    #[expect(clippy::cast_precision_loss)]
    fn set_share(&mut self, matching: usize, distinct_users: usize) {
        self.n = Some(matching as u64);
        self.percent = Some(if distinct_users == 0 {
            0.0
        } else {
            matching as f64 / distinct_users as f64 * 100.0
        });
    }
}

fn ranking_rows(table: &CleanTable) -> Result<&[RankingRow], DataError> {
    match table {
        CleanTable::Ranking(rows) => Ok(rows),
        other => Err(mismatch("ranking", other)),
    }
}

fn mismatch(expected: &'static str, got: &CleanTable) -> DataError {
    DataError::TableMismatch {
        expected,
        got: got.schema_name(),
    }
}

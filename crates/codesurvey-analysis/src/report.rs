//! Report assembly: from raw survey data to the aggregated session tree.
//!
//! The output hierarchy mirrors the survey structure: a session holds
//! sections, sections hold questions, and each question carries its
//! aggregated results plus significance-test outcomes. Question types
//! that compare code samples additionally nest per-sample answer groups.
//!
//! Assembly runs the full pipeline per question: select strategies from
//! the question type, clean the raw answers into a typed table, fan the
//! table out per attribute or per code sample as the type requires, and
//! aggregate and test each slice. A failure in any question aborts the
//! report; there is no partially assembled session.

use std::collections::BTreeMap;

use codesurvey_model::{Attribute, CodeSample, Question, RawAnswer, Section, get_translation};
use serde::Serialize;

use crate::{
    aggregator::AggregatedAnswer,
    cleaner::CleanData,
    error::{ConfigurationError, DataError, ReportError},
    stat_test::Stats,
    table::CleanTable,
};

/// The fully aggregated survey report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedSession {
    pub selected_lang: String,
    pub sections: Vec<AggregatedSection>,
}

/// A section of aggregated questions, ordered by the section's display
/// order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedSection {
    pub id: i64,
    pub order: i64,
    pub repeated_by_sample: bool,
    pub questions: Vec<AggregatedQuestion>,
}

/// One question's aggregated results.
///
/// `results` holds answers that summarize the question as a whole (one
/// per attribute for ranking and attribute-choice questions); `samples`
/// holds per-code-sample answer groups for the question types whose
/// results are naturally keyed by sample. Exactly one of the two is
/// populated for every recognized question type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedQuestion {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: u8,
    pub order: i64,
    pub multiple: bool,
    pub triangle: bool,
    pub discrete: bool,
    pub required: bool,
    pub name: String,
    pub lang: String,
    pub results: Vec<AggregatedAnswer>,
    pub samples: Vec<AggregatedSample>,
    pub stats: Vec<Stats>,
}

/// Aggregated answers grouped under one code sample.
///
/// The sample body lives in the code sample's `code` translation; it is
/// carried here so a report renderer does not need the entity tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedSample {
    pub code_sample_id: i64,
    pub sample_id: i64,
    pub sample_name: String,
    pub code_sample_code: Option<String>,
    pub code_sample_lang: Option<String>,
    pub answers: Vec<AggregatedAnswer>,
}

impl AggregatedSample {
    fn empty(code_sample: &CodeSample, selected_lang: &str) -> Self {
        let code = get_translation(&code_sample.translations, "code", selected_lang);
        Self {
            code_sample_id: code_sample.id,
            sample_id: code_sample.sample_id,
            sample_name: code_sample.sample.name.clone(),
            code_sample_code: code.map(|t| t.value.clone()),
            code_sample_lang: code.map(|t| t.lang.clone()),
            answers: Vec::new(),
        }
    }
}

/// Assembles the aggregated session for a survey.
///
/// `answers_by_question` maps question ids to that question's raw
/// answers; questions absent from the map are processed with an empty
/// answer set and report null or zero-count results.
pub fn assemble_session(
    sections: &[Section],
    answers_by_question: &BTreeMap<i64, Vec<RawAnswer>>,
    code_samples: &[CodeSample],
    selected_lang: &str,
) -> Result<AggregatedSession, ReportError> {
    let mut aggregated_sections = sections
        .iter()
        .map(|section| {
            let mut questions = section
                .questions
                .iter()
                .map(|question| {
                    let answers = answers_by_question
                        .get(&question.id)
                        .map_or(&[][..], Vec::as_slice);
                    assemble_question(question, answers, code_samples, selected_lang)
                })
                .collect::<Result<Vec<_>, _>>()?;
            questions.sort_by_key(|question| question.order);
            Ok(AggregatedSection {
                id: section.id,
                order: section.order,
                repeated_by_sample: section.repeated_by_sample,
                questions,
            })
        })
        .collect::<Result<Vec<_>, ReportError>>()?;
    aggregated_sections.sort_by_key(|section| section.order);
    Ok(AggregatedSession {
        selected_lang: selected_lang.to_string(),
        sections: aggregated_sections,
    })
}

fn assemble_question(
    question: &Question,
    answers: &[RawAnswer],
    code_samples: &[CodeSample],
    selected_lang: &str,
) -> Result<AggregatedQuestion, ReportError> {
    let name = get_translation(&question.translations, "name", selected_lang)
        .ok_or(DataError::MissingTranslation { key: "name" })?;
    let mut aggregated = AggregatedQuestion {
        id: question.id,
        kind: question.kind,
        order: question.order,
        multiple: question.multiple,
        triangle: question.triangle,
        discrete: question.discrete,
        required: question.required,
        name: name.value.clone(),
        lang: name.lang.clone(),
        results: Vec::new(),
        samples: Vec::new(),
        stats: Vec::new(),
    };

    match question.kind {
        1 => assemble_ranking(&mut aggregated, question, answers, code_samples, selected_lang)?,
        2 => assemble_free_text(&mut aggregated, question, answers, code_samples, selected_lang)?,
        3 if question.has_attributes() => {
            assemble_attribute_choice(&mut aggregated, question, answers, code_samples, selected_lang)?;
        }
        3 => assemble_sample_choice(&mut aggregated, question, answers, code_samples, selected_lang)?,
        4 => assemble_ordering(&mut aggregated, question, answers, code_samples, selected_lang)?,
        kind => {
            return Err(ConfigurationError::UnrecognizedQuestionType {
                question_id: question.id,
                kind,
            }
            .into());
        }
    }
    Ok(aggregated)
}

/// Type 1: one result and one test per attribute, each over the slice
/// of answers whose placeholder belongs to that attribute.
fn assemble_ranking(
    aggregated: &mut AggregatedQuestion,
    question: &Question,
    answers: &[RawAnswer],
    code_samples: &[CodeSample],
    selected_lang: &str,
) -> Result<(), ReportError> {
    for attribute in &question.attributes {
        let scoped = answers
            .iter()
            .filter(|answer| {
                answer.placeholder_id.is_some_and(|placeholder_id| {
                    attribute
                        .placeholders
                        .iter()
                        .any(|placeholder| placeholder.id == placeholder_id)
                })
            })
            .cloned()
            .collect::<Vec<_>>();
        let clean = CleanData::new(question, Some(attribute.id))?;
        let table = clean.execute_cleaner(&scoped, selected_lang)?;

        let mut answer = AggregatedAnswer::new(question)?;
        answer.execute_aggregator(&table, selected_lang, Some(attribute), None)?;
        set_attribute_context(&mut answer, attribute, selected_lang)?;
        aggregated.results.push(answer);

        let mut stats = Stats::new(question, Some(attribute.id), code_samples)?;
        stats.execute_test(&table)?;
        aggregated.stats.push(stats);
    }
    Ok(())
}

/// Type 2: every cleaned row becomes one verbatim answer under its code
/// sample; no significance test applies.
fn assemble_free_text(
    aggregated: &mut AggregatedQuestion,
    question: &Question,
    answers: &[RawAnswer],
    code_samples: &[CodeSample],
    selected_lang: &str,
) -> Result<(), ReportError> {
    let clean = CleanData::new(question, None)?;
    let table = clean.execute_cleaner(answers, selected_lang)?;
    let CleanTable::FreeText(rows) = table else {
        return Ok(());
    };
    for code_sample in code_samples {
        let mut sample = AggregatedSample::empty(code_sample, selected_lang);
        for row in rows.iter().filter(|row| row.code_sample_id == code_sample.id) {
            let single = CleanTable::FreeText(vec![row.clone()]);
            let mut answer = AggregatedAnswer::new(question)?;
            answer.execute_aggregator(&single, selected_lang, None, None)?;
            set_sample_context(&mut answer, code_sample);
            sample.answers.push(answer);
        }
        aggregated.samples.push(sample);
    }
    Ok(())
}

/// Type 3 with attributes: clean once, aggregate per attribute, test
/// once over the whole table.
fn assemble_attribute_choice(
    aggregated: &mut AggregatedQuestion,
    question: &Question,
    answers: &[RawAnswer],
    code_samples: &[CodeSample],
    selected_lang: &str,
) -> Result<(), ReportError> {
    let clean = CleanData::new(question, None)?;
    let table = clean.execute_cleaner(answers, selected_lang)?;
    for attribute in &question.attributes {
        let mut answer = AggregatedAnswer::new(question)?;
        answer.execute_aggregator(&table, selected_lang, Some(attribute), None)?;
        set_attribute_context(&mut answer, attribute, selected_lang)?;
        aggregated.results.push(answer);
    }
    let mut stats = Stats::new(question, None, code_samples)?;
    stats.execute_test(&table)?;
    aggregated.stats.push(stats);
    Ok(())
}

/// Type 3 without attributes: one share answer per code sample, one
/// test over the whole table.
fn assemble_sample_choice(
    aggregated: &mut AggregatedQuestion,
    question: &Question,
    answers: &[RawAnswer],
    code_samples: &[CodeSample],
    selected_lang: &str,
) -> Result<(), ReportError> {
    let clean = CleanData::new(question, None)?;
    let table = clean.execute_cleaner(answers, selected_lang)?;
    for code_sample in code_samples {
        let mut sample = AggregatedSample::empty(code_sample, selected_lang);
        let mut answer = AggregatedAnswer::new(question)?;
        answer.execute_aggregator(&table, selected_lang, None, Some(code_sample))?;
        set_sample_context(&mut answer, code_sample);
        sample.answers.push(answer);
        aggregated.samples.push(sample);
    }
    let mut stats = Stats::new(question, None, code_samples)?;
    stats.execute_test(&table)?;
    aggregated.stats.push(stats);
    Ok(())
}

/// Type 4: one order histogram per code sample over that sample's rows,
/// one test over the whole table.
fn assemble_ordering(
    aggregated: &mut AggregatedQuestion,
    question: &Question,
    answers: &[RawAnswer],
    code_samples: &[CodeSample],
    selected_lang: &str,
) -> Result<(), ReportError> {
    let clean = CleanData::new(question, None)?;
    let table = clean.execute_cleaner(answers, selected_lang)?;
    let CleanTable::Ordering(rows) = &table else {
        return Ok(());
    };
    for code_sample in code_samples {
        let scoped = rows
            .iter()
            .filter(|row| row.code_sample_id == code_sample.id)
            .cloned()
            .collect::<Vec<_>>();
        let mut sample = AggregatedSample::empty(code_sample, selected_lang);
        let mut answer = AggregatedAnswer::new(question)?;
        answer.execute_aggregator(
            &CleanTable::Ordering(scoped),
            selected_lang,
            None,
            Some(code_sample),
        )?;
        set_sample_context(&mut answer, code_sample);
        sample.answers.push(answer);
        aggregated.samples.push(sample);
    }
    let mut stats = Stats::new(question, None, code_samples)?;
    stats.execute_test(&table)?;
    aggregated.stats.push(stats);
    Ok(())
}

fn set_attribute_context(
    answer: &mut AggregatedAnswer,
    attribute: &Attribute,
    selected_lang: &str,
) -> Result<(), DataError> {
    let name = get_translation(&attribute.translations, "name", selected_lang)
        .ok_or(DataError::MissingTranslation { key: "name" })?;
    answer.attribute_id = Some(attribute.id);
    answer.attribute_order = Some(attribute.order);
    answer.attribute_name = Some(name.value.clone());
    answer.attribute_lang = Some(name.lang.clone());
    Ok(())
}

fn set_sample_context(answer: &mut AggregatedAnswer, code_sample: &CodeSample) {
    answer.code_sample_id = Some(code_sample.id);
    answer.sample_id = Some(code_sample.sample_id);
}

#[cfg(test)]
mod tests {
    use codesurvey_model::{AnswerValue, Attribute, Placeholder, Sample, Translation};
    use uuid::Uuid;

    use crate::stat_test::StatTestKind;

    use super::*;

    fn user(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    fn named(value: &str) -> Vec<Translation> {
        vec![Translation {
            key: "name".into(),
            lang: "en".into(),
            value: value.into(),
        }]
    }

    fn code_samples(count: i64) -> Vec<CodeSample> {
        (1..=count)
            .map(|id| CodeSample {
                id,
                sample_id: id + 100,
                sample: Sample {
                    id: id + 100,
                    name: format!("S{id}"),
                },
                translations: vec![],
            })
            .collect()
    }

    fn question(kind: u8, attributes: Vec<Attribute>) -> Question {
        Question {
            id: 1,
            kind,
            order: 0,
            multiple: false,
            triangle: false,
            discrete: false,
            required: true,
            attributes,
            translations: named("Q"),
        }
    }

    fn section(questions: Vec<Question>) -> Vec<Section> {
        vec![Section {
            id: 1,
            repeated_by_sample: false,
            order: 0,
            questions,
        }]
    }

    fn answer(user_id: u128, code_sample_id: i64, value: Option<AnswerValue>) -> RawAnswer {
        RawAnswer {
            user_id: user(user_id),
            code_sample_id,
            placeholder_id: None,
            attribute_id: None,
            value,
        }
    }

    #[test]
    fn test_free_text_question() {
        let sections = section(vec![question(2, vec![])]);
        let answers = BTreeMap::from([(
            1,
            vec![answer(1, 1, Some(AnswerValue::Text("ok".into())))],
        )]);
        let session = assemble_session(&sections, &answers, &code_samples(1), "en").unwrap();

        let q = &session.sections[0].questions[0];
        assert!(q.results.is_empty());
        assert!(q.stats.is_empty());
        assert_eq!(q.samples.len(), 1);
        let a = &q.samples[0].answers[0];
        assert_eq!(a.text.as_deref(), Some("ok"));
        assert_eq!(a.user_id, Some(user(1)));
        assert_eq!(a.code_sample_id, Some(1));
        assert_eq!(a.sample_id, Some(101));
    }

    #[test]
    fn test_ordering_question_histogram() {
        let sections = section(vec![question(4, vec![])]);
        let answers = BTreeMap::from([(
            1,
            vec![
                answer(1, 1, Some(AnswerValue::Number(0.0))),
                answer(2, 1, Some(AnswerValue::Number(0.0))),
                answer(3, 1, Some(AnswerValue::Number(1.0))),
            ],
        )]);
        let session = assemble_session(&sections, &answers, &code_samples(1), "en").unwrap();

        let q = &session.sections[0].questions[0];
        assert_eq!(q.samples.len(), 1);
        let a = &q.samples[0].answers[0];
        let histogram = a.order.as_ref().unwrap();
        assert_eq!(histogram[&0], 2);
        assert_eq!(histogram[&1], 1);
        assert!((a.weighted_order.unwrap() - 1.0).abs() < 1e-12);
        // One code sample selects the first-choice chi-square test.
        assert_eq!(q.stats.len(), 1);
        assert_eq!(q.stats[0].test(), Some(StatTestKind::ChiSquareFirstChoice));
    }

    #[test]
    fn test_attribute_choice_share() {
        let attributes = vec![
            Attribute {
                id: 10,
                order: 0,
                placeholders: vec![],
                translations: named("Correct"),
            },
            Attribute {
                id: 20,
                order: 1,
                placeholders: vec![],
                translations: named("Incorrect"),
            },
        ];
        let sections = section(vec![question(3, attributes)]);
        let mut raw = Vec::new();
        for id in 0..10u128 {
            let mut a = answer(id, 1, Some(AnswerValue::Bool(true)));
            a.attribute_id = Some(if id < 3 { 10 } else { 20 });
            raw.push(a);
        }
        let answers = BTreeMap::from([(1, raw)]);
        let session = assemble_session(&sections, &answers, &code_samples(2), "en").unwrap();

        let q = &session.sections[0].questions[0];
        assert_eq!(q.results.len(), 2);
        let first = &q.results[0];
        assert_eq!(first.attribute_id, Some(10));
        assert_eq!(first.attribute_name.as_deref(), Some("Correct"));
        assert_eq!(first.n, Some(3));
        assert!((first.percent.unwrap() - 30.0).abs() < 1e-12);
        assert_eq!(q.stats.len(), 1);
        assert_eq!(q.stats[0].test(), Some(StatTestKind::ChiSquareAttributes));
    }

    #[test]
    fn test_ranking_question_per_attribute() {
        let attributes = vec![Attribute {
            id: 10,
            order: 0,
            placeholders: vec![
                Placeholder {
                    id: 100,
                    order: 0,
                    translations: named("1"),
                },
                Placeholder {
                    id: 101,
                    order: 1,
                    translations: named("2"),
                },
            ],
            translations: named("Preference"),
        }];
        let sections = section(vec![question(1, attributes)]);
        let mut raw = Vec::new();
        for (user_id, code_sample_id, placeholder_id) in
            [(1, 1, 100), (1, 2, 101), (2, 1, 101), (2, 2, 100)]
        {
            let mut a = answer(user_id, code_sample_id, None);
            a.placeholder_id = Some(placeholder_id);
            raw.push(a);
        }
        let answers = BTreeMap::from([(1, raw)]);
        let session = assemble_session(&sections, &answers, &code_samples(2), "en").unwrap();

        let q = &session.sections[0].questions[0];
        assert_eq!(q.results.len(), 1);
        let result = &q.results[0];
        assert_eq!(result.attribute_id, Some(10));
        assert_eq!(result.placeholders.len(), 2);
        assert_eq!(result.placeholders[0].n, 2);
        assert!((result.mean_order.unwrap() - 0.5).abs() < 1e-12);
        // Two code samples select the paired t-test, per attribute.
        assert_eq!(q.stats.len(), 1);
        assert_eq!(q.stats[0].test(), Some(StatTestKind::PairedTTest));
        assert_eq!(q.stats[0].attribute_id, Some(10));
    }

    #[test]
    fn test_question_without_answers() {
        let sections = section(vec![question(3, vec![])]);
        let session =
            assemble_session(&sections, &BTreeMap::new(), &code_samples(2), "en").unwrap();
        let q = &session.sections[0].questions[0];
        assert_eq!(q.samples.len(), 2);
        assert_eq!(q.samples[0].answers[0].n, Some(0));
        assert_eq!(q.samples[0].answers[0].percent, Some(0.0));
        assert_eq!(q.stats[0].p_value, None);
    }

    #[test]
    fn test_missing_question_name_is_an_error() {
        let mut bare = question(2, vec![]);
        bare.translations.clear();
        let sections = section(vec![bare]);
        let result = assemble_session(&sections, &BTreeMap::new(), &code_samples(1), "en");
        assert_eq!(
            result,
            Err(ReportError::Data(DataError::MissingTranslation {
                key: "name"
            }))
        );
    }

    #[test]
    fn test_session_serialization_shape() {
        let sections = section(vec![question(3, vec![])]);
        let session =
            assemble_session(&sections, &BTreeMap::new(), &code_samples(1), "en").unwrap();
        let json = serde_json::to_value(&session).unwrap();

        let q = &json["sections"][0]["questions"][0];
        assert_eq!(q["type"], 3);
        assert_eq!(q["name"], "Q");
        // Strategy fields are internal and never serialized.
        let answer = &q["samples"][0]["answers"][0];
        assert!(answer.get("aggregator").is_none());
        assert!(q["stats"][0].get("test").is_none());
        assert!(q["stats"][0]["p_value"].is_null());
    }

    #[test]
    fn test_sections_and_questions_sorted_by_order() {
        let mut early = question(2, vec![]);
        early.id = 2;
        early.order = 1;
        let mut late = question(2, vec![]);
        late.id = 3;
        late.order = 0;
        let sections = vec![Section {
            id: 1,
            repeated_by_sample: false,
            order: 0,
            questions: vec![early, late],
        }];
        let session =
            assemble_session(&sections, &BTreeMap::new(), &code_samples(1), "en").unwrap();
        let ids = session.sections[0]
            .questions
            .iter()
            .map(|q| q.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, [3, 2]);
    }
}

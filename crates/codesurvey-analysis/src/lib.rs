//! Survey answer analysis: cleaning, aggregation and significance tests.
//!
//! This crate turns raw survey answers about code samples into an
//! aggregated report with per-question summaries and p-values.
//!
//! # Overview
//!
//! Processing is a three-stage pipeline, with every stage driven by a
//! strategy selected once from the question type:
//!
//! 1. **Cleaning** ([`cleaner::CleanData`]): raw answers become a typed
//!    table ([`table::CleanTable`]) with one fixed row schema per
//!    question type
//! 2. **Aggregation** ([`aggregator::AggregatedAnswer`]): a table
//!    becomes a per-question (or per-attribute, or per-code-sample)
//!    summary
//! 3. **Significance testing** ([`stat_test::Stats`]): a table becomes
//!    p-values comparing the code samples, via the procedures in
//!    `codesurvey_stats`
//!
//! [`report::assemble_session`] runs the whole pipeline over a survey's
//! sections and produces the serializable [`report::AggregatedSession`]
//! tree.
//!
//! Strategy selection failures ([`error::ConfigurationError`]) and
//! malformed inputs ([`error::DataError`]) are reported as errors;
//! purely statistical failures (too little data, degenerate variance)
//! are downgraded to null p-values so one sparse question cannot abort
//! a report.
//!
//! # Examples
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use codesurvey_analysis::report;
//! use codesurvey_model::{
//!     AnswerValue, CodeSample, Question, RawAnswer, Sample, Section, Translation,
//! };
//! use uuid::Uuid;
//!
//! # fn main() -> Result<(), codesurvey_analysis::error::ReportError> {
//! let question = Question {
//!     id: 1,
//!     kind: 2,
//!     order: 0,
//!     multiple: false,
//!     triangle: false,
//!     discrete: false,
//!     required: false,
//!     attributes: vec![],
//!     translations: vec![Translation {
//!         key: "name".into(),
//!         lang: "en".into(),
//!         value: "Any remarks?".into(),
//!     }],
//! };
//! let sections = vec![Section {
//!     id: 1,
//!     repeated_by_sample: false,
//!     order: 0,
//!     questions: vec![question],
//! }];
//! let code_samples = vec![CodeSample {
//!     id: 7,
//!     sample_id: 1,
//!     sample: Sample { id: 1, name: "loop".into() },
//!     translations: vec![],
//! }];
//! let answers = BTreeMap::from([(
//!     1,
//!     vec![RawAnswer {
//!         user_id: Uuid::from_u128(1),
//!         code_sample_id: 7,
//!         placeholder_id: None,
//!         attribute_id: None,
//!         value: Some(AnswerValue::Text("looks fine".into())),
//!     }],
//! )]);
//!
//! let session = report::assemble_session(&sections, &answers, &code_samples, "en")?;
//! let answer = &session.sections[0].questions[0].samples[0].answers[0];
//! assert_eq!(answer.text.as_deref(), Some("looks fine"));
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod cleaner;
pub mod error;
pub mod report;
pub mod table;

pub use self::{
    aggregator::{AggregatedAnswer, AggregatedPlaceholder, AggregatorKind, select_aggregator},
    cleaner::{CleanData, CleanerKind, select_cleaner},
    error::{ConfigurationError, DataError, ReportError},
    report::{
        AggregatedQuestion, AggregatedSample, AggregatedSection, AggregatedSession,
        assemble_session,
    },
    stat_test::{StatTestKind, Stats, select_stat_test},
    table::CleanTable,
};

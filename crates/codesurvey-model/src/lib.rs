//! Domain entities consumed by the survey statistics pipeline.
//!
//! This crate defines the read-only data the analysis layer operates on:
//! questions with their attributes and placeholders, code samples, raw
//! per-user answer records, and translated display texts. Everything here
//! is plain in-memory data with `serde` support; loading it from storage
//! is the caller's concern.
//!
//! # Data Structure
//!
//! ```text
//! Section
//! └─ questions: Vec<Question>
//!     ├─ kind (1 = ranking, 2 = free text, 3 = choice, 4 = ordering)
//!     ├─ flags (multiple, triangle, discrete, required)
//!     └─ attributes: Vec<Attribute>
//!         └─ placeholders: Vec<Placeholder>
//! ```
//!
//! Raw answers reference these entities by id:
//!
//! ```text
//! RawAnswer { user_id, code_sample_id, placeholder_id?, attribute_id?, value? }
//! ```
//!
//! # Translations
//!
//! Display texts (question names, placeholder names, code sample bodies)
//! are stored as per-language [`Translation`] lists. [`get_translation`]
//! resolves the preferred language with a fallback to whatever language is
//! available, so a report can always be rendered.

pub mod answer;
pub mod question;
pub mod sample;
pub mod translation;

pub use answer::{AnswerValue, RawAnswer};
pub use question::{Attribute, Placeholder, Question, Section};
pub use sample::{CodeSample, Sample};
pub use translation::{Translation, get_translation};

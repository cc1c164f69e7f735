//! Typed tabular record sets produced by cleaning.
//!
//! The common currency between cleaners, aggregators and significance
//! tests is a table with a fixed column schema per question type. Rather
//! than a dynamically typed frame, each schema is a row struct and the
//! table is a closed enum over row vectors, so handing the wrong shape
//! to a downstream strategy is detectable at the boundary.

use std::collections::BTreeSet;

use uuid::Uuid;

/// Row schema for type-1 (ranking) questions.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingRow {
    pub user_id: Uuid,
    pub placeholder_id: i64,
    pub placeholder_order: i64,
    pub placeholder_name: String,
    pub code_sample_id: i64,
}

/// Row schema for type-2 (free text) questions.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeTextRow {
    pub user_id: Uuid,
    pub value: String,
    pub code_sample_id: i64,
}

/// Row schema for type-3 questions with attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeChoiceRow {
    pub user_id: Uuid,
    pub attribute_id: i64,
    pub code_sample_id: i64,
}

/// Row schema for type-3 questions without attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleChoiceRow {
    pub user_id: Uuid,
    pub code_sample_id: i64,
}

/// Row schema for type-4 (ordering) questions.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderingRow {
    pub user_id: Uuid,
    pub code_sample_id: i64,
    pub order: i64,
}

/// A cleaned tabular record set, one variant per cleaning schema.
#[derive(Debug, Clone, PartialEq)]
pub enum CleanTable {
    Ranking(Vec<RankingRow>),
    FreeText(Vec<FreeTextRow>),
    AttributeChoice(Vec<AttributeChoiceRow>),
    SampleChoice(Vec<SampleChoiceRow>),
    Ordering(Vec<OrderingRow>),
}

impl CleanTable {
    /// Number of rows in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Ranking(rows) => rows.len(),
            Self::FreeText(rows) => rows.len(),
            Self::AttributeChoice(rows) => rows.len(),
            Self::SampleChoice(rows) => rows.len(),
            Self::Ordering(rows) => rows.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The schema name, used in shape-mismatch diagnostics.
    #[must_use]
    pub fn schema_name(&self) -> &'static str {
        match self {
            Self::Ranking(_) => "ranking",
            Self::FreeText(_) => "free_text",
            Self::AttributeChoice(_) => "attribute_choice",
            Self::SampleChoice(_) => "sample_choice",
            Self::Ordering(_) => "ordering",
        }
    }

    /// Number of distinct users contributing rows to the table.
    #[must_use]
    pub fn distinct_user_count(&self) -> usize {
        let users: BTreeSet<Uuid> = match self {
            Self::Ranking(rows) => rows.iter().map(|r| r.user_id).collect(),
            Self::FreeText(rows) => rows.iter().map(|r| r.user_id).collect(),
            Self::AttributeChoice(rows) => rows.iter().map(|r| r.user_id).collect(),
            Self::SampleChoice(rows) => rows.iter().map(|r| r.user_id).collect(),
            Self::Ordering(rows) => rows.iter().map(|r| r.user_id).collect(),
        };
        users.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn test_len_and_schema_name() {
        let table = CleanTable::Ordering(vec![OrderingRow {
            user_id: user(1),
            code_sample_id: 1,
            order: 0,
        }]);
        assert_eq!(table.len(), 1);
        assert!(!table.is_empty());
        assert_eq!(table.schema_name(), "ordering");
    }

    #[test]
    fn test_distinct_user_count() {
        let table = CleanTable::SampleChoice(vec![
            SampleChoiceRow {
                user_id: user(1),
                code_sample_id: 1,
            },
            SampleChoiceRow {
                user_id: user(1),
                code_sample_id: 2,
            },
            SampleChoiceRow {
                user_id: user(2),
                code_sample_id: 1,
            },
        ]);
        assert_eq!(table.distinct_user_count(), 2);
    }
}

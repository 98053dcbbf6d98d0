//! Evaluation criterion reference entity.

use crate::utils::text::eq_ignore_case;

/// A named axis a review can be graded on (e.g. "Service").
///
/// Criteria form a fixed catalog. Grades reference a criterion; they never own it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
}

impl Criterion {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description,
        }
    }

    /// Case-insensitive name match, as used by catalog lookups and statistics.
    pub fn is_named(&self, name: &str) -> bool {
        eq_ignore_case(&self.name, name)
    }

    /// Two criteria are the same catalog entry when their ids match, or, for
    /// unsaved criteria, when their names match case-insensitively.
    pub fn same_as(&self, other: &Criterion) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => self.is_named(&other.name),
        }
    }
}

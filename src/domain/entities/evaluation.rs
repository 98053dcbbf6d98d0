//! Feedback left on a restaurant: votes, reviews and their grades.
//!
//! An [`Evaluation`] is either a [`Vote`] (like / dislike) or a [`Review`]
//! (comment plus per-criterion [`Grade`]s). Both variants carry the same header:
//! an optional storage id, the owning restaurant's id and the visit timestamp.
//! Consumers match on the variant instead of downcasting.

use chrono::{DateTime, Utc};
use serde_json::json;

use super::criterion::Criterion;
use crate::error::AppError;

/// Lowest accepted grade score.
pub const MIN_SCORE: i64 = 1;
/// Highest accepted grade score.
pub const MAX_SCORE: i64 = 5;

/// A grade score guaranteed to lie in `MIN_SCORE..=MAX_SCORE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u8);

impl Score {
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Score {
    type Error = AppError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
            return Err(AppError::invalid_grade(
                format!("Grade {value} is out of range ({MIN_SCORE}-{MAX_SCORE})"),
                json!({ "value": value, "min": MIN_SCORE, "max": MAX_SCORE }),
            ));
        }

        // Range-checked above, fits in u8.
        Ok(Self(value as u8))
    }
}

/// One score on one criterion, owned by exactly one review.
#[derive(Debug, Clone, PartialEq)]
pub struct Grade {
    pub id: Option<i64>,
    /// Back-reference to the owning review, set once the review is stored.
    pub review_id: Option<i64>,
    pub criterion: Criterion,
    pub score: Score,
}

impl Grade {
    pub fn new(criterion: Criterion, score: Score) -> Self {
        Self {
            id: None,
            review_id: None,
            criterion,
            score,
        }
    }
}

/// A like / dislike without scoring detail.
#[derive(Debug, Clone, PartialEq)]
pub struct Vote {
    pub id: Option<i64>,
    pub restaurant_id: Option<i64>,
    pub visited_at: DateTime<Utc>,
    pub liked: bool,
    /// Coarse submitter origin (network address). Advisory only, never enforced.
    pub origin: String,
}

impl Vote {
    /// Creates an unsaved vote. The restaurant back-reference is set when the
    /// vote is attached with [`super::Restaurant::add_evaluation`].
    pub fn new(liked: bool, origin: impl Into<String>, visited_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            restaurant_id: None,
            visited_at,
            liked,
            origin: origin.into(),
        }
    }
}

/// A commented evaluation graded on catalog criteria.
///
/// Holds at most one grade per criterion.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: Option<i64>,
    pub restaurant_id: Option<i64>,
    pub visited_at: DateTime<Utc>,
    pub username: String,
    pub comment: String,
    grades: Vec<Grade>,
}

impl Review {
    pub fn new(
        username: impl Into<String>,
        comment: impl Into<String>,
        visited_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            restaurant_id: None,
            visited_at,
            username: username.into(),
            comment: comment.into(),
            grades: Vec::new(),
        }
    }

    /// Attaches a grade to this review.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the review already holds a grade for
    /// the same criterion. The review is left unchanged.
    pub fn add_grade(&mut self, mut grade: Grade) -> Result<(), AppError> {
        if self
            .grades
            .iter()
            .any(|existing| existing.criterion.same_as(&grade.criterion))
        {
            return Err(AppError::validation(
                "A review can grade each criterion only once",
                json!({ "criterion": grade.criterion.name }),
            ));
        }

        grade.review_id = self.id;
        self.grades.push(grade);
        Ok(())
    }

    pub fn grades(&self) -> &[Grade] {
        &self.grades
    }

    /// Finds the grade given for a criterion, matching its name case-insensitively.
    pub fn grade_for(&self, criterion_name: &str) -> Option<&Grade> {
        self.grades
            .iter()
            .find(|grade| grade.criterion.is_named(criterion_name))
    }

    pub(crate) fn grades_mut(&mut self) -> &mut [Grade] {
        &mut self.grades
    }
}

/// Feedback unit attached to a restaurant.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Vote(Vote),
    Review(Review),
}

impl Evaluation {
    pub fn id(&self) -> Option<i64> {
        match self {
            Evaluation::Vote(vote) => vote.id,
            Evaluation::Review(review) => review.id,
        }
    }

    pub fn restaurant_id(&self) -> Option<i64> {
        match self {
            Evaluation::Vote(vote) => vote.restaurant_id,
            Evaluation::Review(review) => review.restaurant_id,
        }
    }

    pub fn visited_at(&self) -> DateTime<Utc> {
        match self {
            Evaluation::Vote(vote) => vote.visited_at,
            Evaluation::Review(review) => review.visited_at,
        }
    }

    /// Discriminator stored alongside the row: `"vote"` or `"review"`.
    pub fn kind(&self) -> &'static str {
        match self {
            Evaluation::Vote(_) => "vote",
            Evaluation::Review(_) => "review",
        }
    }

    pub fn as_vote(&self) -> Option<&Vote> {
        match self {
            Evaluation::Vote(vote) => Some(vote),
            Evaluation::Review(_) => None,
        }
    }

    pub fn as_review(&self) -> Option<&Review> {
        match self {
            Evaluation::Review(review) => Some(review),
            Evaluation::Vote(_) => None,
        }
    }

    pub(crate) fn set_restaurant_id(&mut self, restaurant_id: Option<i64>) {
        match self {
            Evaluation::Vote(vote) => vote.restaurant_id = restaurant_id,
            Evaluation::Review(review) => review.restaurant_id = restaurant_id,
        }
    }

    /// Records the storage id, propagating it to a review's grades.
    pub(crate) fn set_id(&mut self, id: i64) {
        match self {
            Evaluation::Vote(vote) => vote.id = Some(id),
            Evaluation::Review(review) => {
                review.id = Some(id);
                for grade in review.grades_mut() {
                    grade.review_id = Some(id);
                }
            }
        }
    }
}

impl From<Vote> for Evaluation {
    fn from(vote: Vote) -> Self {
        Evaluation::Vote(vote)
    }
}

impl From<Review> for Evaluation {
    fn from(review: Review) -> Self {
        Evaluation::Review(review)
    }
}

//! Read-only access to evaluations and grades.

use crate::domain::entities::{Evaluation, Grade};
use crate::error::AppError;
use async_trait::async_trait;

/// Lookups over stored evaluations.
///
/// There are no write methods: evaluations and grades are only ever stored or
/// removed through their restaurant (see [`super::RestaurantRepository::save`]).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EvaluationRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Evaluation>, AppError>;

    /// Evaluations of one restaurant, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_restaurant(&self, restaurant_id: i64) -> Result<Vec<Evaluation>, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_grade_by_id(&self, id: i64) -> Result<Option<Grade>, AppError>;
}

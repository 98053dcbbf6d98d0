//! Repository trait for the criterion catalog.

use crate::domain::entities::Criterion;
use crate::error::AppError;
use async_trait::async_trait;

/// Access to evaluation criteria.
///
/// The catalog is reference data: grades point at criteria, and a criterion
/// that is still graded somewhere cannot be deleted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CriterionRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Criterion>, AppError>;

    /// All criteria ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_all(&self) -> Result<Vec<Criterion>, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the name is already taken.
    /// Returns [`AppError::NotFound`] when updating a criterion that no longer exists.
    /// Returns [`AppError::Storage`] on database errors.
    async fn save(&self, criterion: Criterion) -> Result<Criterion, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] while grades still reference the criterion.
    /// Returns [`AppError::Storage`] on database errors.
    async fn delete(&self, criterion: &Criterion) -> Result<(), AppError>;

    /// Returns `Ok(false)` if no such criterion existed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] while grades still reference the criterion.
    /// Returns [`AppError::Storage`] on database errors.
    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError>;

    /// Criteria whose name contains `name`, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_name(&self, name: &str) -> Result<Vec<Criterion>, AppError>;

    /// Criterion whose name equals `name`, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_exact_name(&self, name: &str) -> Result<Option<Criterion>, AppError>;
}

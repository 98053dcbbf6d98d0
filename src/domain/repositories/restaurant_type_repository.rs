//! Repository trait for restaurant types.

use crate::domain::entities::RestaurantType;
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantTypeRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<RestaurantType>, AppError>;

    /// All types ordered by label.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_all(&self) -> Result<Vec<RestaurantType>, AppError>;

    /// Inserts the type if it has no id, updates it otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the label is already taken.
    /// Returns [`AppError::NotFound`] when updating a type that no longer exists.
    /// Returns [`AppError::Storage`] on database errors.
    async fn save(&self, restaurant_type: RestaurantType) -> Result<RestaurantType, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] while restaurants still reference the type.
    /// Returns [`AppError::Storage`] on database errors.
    async fn delete(&self, restaurant_type: &RestaurantType) -> Result<(), AppError>;

    /// Returns `Ok(false)` if no such type existed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] while restaurants still reference the type.
    /// Returns [`AppError::Storage`] on database errors.
    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError>;

    /// Types whose label contains `label`, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_label(&self, label: &str) -> Result<Vec<RestaurantType>, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_exact_label(&self, label: &str)
    -> Result<Option<RestaurantType>, AppError>;
}

//! Repository trait for the restaurant aggregate.

use crate::domain::entities::Restaurant;
use crate::error::AppError;
use async_trait::async_trait;

/// Persistence for restaurants and everything they own.
///
/// A restaurant is loaded and stored as a whole: its evaluations and their grades
/// travel with it. Each write is one transaction.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteRestaurantRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_restaurant.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Loads a restaurant with its address, type, evaluations and grades.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Restaurant>, AppError>;

    /// Loads every restaurant, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_all(&self) -> Result<Vec<Restaurant>, AppError>;

    /// Inserts the restaurant if it has no id, updates it otherwise.
    ///
    /// New evaluations (and their grades) are inserted; stored evaluations no
    /// longer present in the collection are deleted. Returns the aggregate with
    /// every assigned id filled in.
    ///
    /// The collection is taken as authoritative: saving a snapshot loaded before
    /// another caller added an evaluation deletes that evaluation. Use
    /// [`RestaurantRepository::update_details`] for edits that do not touch
    /// evaluations.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when updating a restaurant that no longer exists.
    /// Returns [`AppError::Conflict`] if the city, type or a criterion does not exist.
    /// Returns [`AppError::Storage`] on database errors. Nothing is written on error.
    async fn save(&self, restaurant: Restaurant) -> Result<Restaurant, AppError>;

    /// Rewrites name, description, website, address and type of a stored
    /// restaurant. Evaluations are neither read nor written.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the restaurant is unsaved or no longer exists.
    /// Returns [`AppError::Conflict`] if the city or type does not exist.
    /// Returns [`AppError::Storage`] on database errors.
    async fn update_details(&self, restaurant: &Restaurant) -> Result<(), AppError>;

    /// Deletes the restaurant and, by cascade, its evaluations and grades.
    /// Unsaved or already deleted restaurants are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn delete(&self, restaurant: &Restaurant) -> Result<(), AppError>;

    /// Deletes by id. Returns `Ok(false)` if no such restaurant existed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError>;

    /// Restaurants whose name contains `name`, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_name(&self, name: &str) -> Result<Vec<Restaurant>, AppError>;

    /// Restaurants located in the given city.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_city(&self, city_id: i64) -> Result<Vec<Restaurant>, AppError>;

    /// Restaurants of the given type.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_type(&self, type_id: i64) -> Result<Vec<Restaurant>, AppError>;
}

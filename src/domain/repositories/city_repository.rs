//! Repository trait for cities.

use crate::domain::entities::City;
use crate::error::AppError;
use async_trait::async_trait;

/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteCityRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CityRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<City>, AppError>;

    /// All cities ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_all(&self) -> Result<Vec<City>, AppError>;

    /// Inserts the city if it has no id, updates it otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when updating a city that no longer exists.
    /// Returns [`AppError::Storage`] on database errors.
    async fn save(&self, city: City) -> Result<City, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] while restaurants still reference the city.
    /// Returns [`AppError::Storage`] on database errors.
    async fn delete(&self, city: &City) -> Result<(), AppError>;

    /// Returns `Ok(false)` if no such city existed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] while restaurants still reference the city.
    /// Returns [`AppError::Storage`] on database errors.
    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_zip_code(&self, zip_code: &str) -> Result<Option<City>, AppError>;

    /// Cities whose name contains `name`, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_name(&self, name: &str) -> Result<Vec<City>, AppError>;

    /// City whose name equals `name`, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_exact_name(&self, name: &str) -> Result<Option<City>, AppError>;
}

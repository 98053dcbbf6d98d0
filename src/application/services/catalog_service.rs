//! Read and create access to reference data: cities, restaurant types, criteria.

use std::sync::Arc;

use validator::Validate;

use crate::domain::entities::{City, Criterion, RestaurantType};
use crate::domain::repositories::{CityRepository, CriterionRepository, RestaurantTypeRepository};
use crate::error::AppError;
use crate::utils::text::{non_blank, required};

#[derive(Debug, Validate)]
struct CityForm {
    #[validate(custom(function = "required"), length(max = 10))]
    zip_code: String,
    #[validate(custom(function = "required"), length(max = 100))]
    name: String,
}

#[derive(Debug, Validate)]
struct TypeForm {
    #[validate(custom(function = "required"), length(max = 100))]
    label: String,
}

/// Reference data used when creating or editing restaurants.
///
/// The criterion catalog is read-only here; it is seeded by the migrations.
pub struct CatalogService<C, T, K>
where
    C: CityRepository,
    T: RestaurantTypeRepository,
    K: CriterionRepository,
{
    city_repository: Arc<C>,
    type_repository: Arc<T>,
    criterion_repository: Arc<K>,
}

impl<C, T, K> CatalogService<C, T, K>
where
    C: CityRepository,
    T: RestaurantTypeRepository,
    K: CriterionRepository,
{
    pub fn new(
        city_repository: Arc<C>,
        type_repository: Arc<T>,
        criterion_repository: Arc<K>,
    ) -> Self {
        Self {
            city_repository,
            type_repository,
            criterion_repository,
        }
    }

    pub async fn list_cities(&self) -> Result<Vec<City>, AppError> {
        self.city_repository.find_all().await
    }

    pub async fn search_cities(&self, fragment: &str) -> Result<Vec<City>, AppError> {
        self.city_repository.find_by_name(fragment.trim()).await
    }

    /// The city whose name equals `name`, ignoring case.
    pub async fn find_city_by_name(&self, name: &str) -> Result<Option<City>, AppError> {
        self.city_repository.find_by_exact_name(name.trim()).await
    }

    pub async fn find_city_by_zip_code(&self, zip_code: &str) -> Result<Option<City>, AppError> {
        self.city_repository.find_by_zip_code(zip_code).await
    }

    /// Stores a new city.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the zip code or the name is blank.
    pub async fn create_city(&self, zip_code: String, name: String) -> Result<City, AppError> {
        let form = CityForm {
            zip_code: zip_code.trim().to_string(),
            name: name.trim().to_string(),
        };
        form.validate()?;

        let city = self
            .city_repository
            .save(City::new(form.zip_code, form.name))
            .await?;
        tracing::info!(city_id = ?city.id, name = %city.name, "City created");
        Ok(city)
    }

    pub async fn list_types(&self) -> Result<Vec<RestaurantType>, AppError> {
        self.type_repository.find_all().await
    }

    pub async fn search_types(&self, fragment: &str) -> Result<Vec<RestaurantType>, AppError> {
        self.type_repository.find_by_label(fragment.trim()).await
    }

    pub async fn find_type_by_label(&self, label: &str) -> Result<Option<RestaurantType>, AppError> {
        self.type_repository.find_by_exact_label(label).await
    }

    /// Stores a new restaurant type.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the label is blank.
    /// Returns [`AppError::Conflict`] if the label is already taken.
    pub async fn create_type(
        &self,
        label: String,
        description: Option<String>,
    ) -> Result<RestaurantType, AppError> {
        let form = TypeForm {
            label: label.trim().to_string(),
        };
        form.validate()?;

        let restaurant_type = self
            .type_repository
            .save(RestaurantType::new(form.label, non_blank(description)))
            .await?;
        tracing::info!(
            type_id = ?restaurant_type.id,
            label = %restaurant_type.label,
            "Restaurant type created"
        );
        Ok(restaurant_type)
    }

    pub async fn list_criteria(&self) -> Result<Vec<Criterion>, AppError> {
        self.criterion_repository.find_all().await
    }

    pub async fn find_criterion(&self, name: &str) -> Result<Option<Criterion>, AppError> {
        self.criterion_repository.find_by_exact_name(name).await
    }
}

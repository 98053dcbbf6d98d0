//! Restaurant creation, editing and lookup service.

use std::sync::Arc;

use serde_json::json;
use validator::Validate;

use crate::domain::entities::{Address, City, Restaurant, RestaurantType};
use crate::domain::repositories::{CityRepository, RestaurantRepository, RestaurantTypeRepository};
use crate::error::AppError;
use crate::utils::text::{eq_ignore_case, non_blank, required};

/// Editable restaurant fields, checked before anything is stored.
#[derive(Debug, Validate)]
struct RestaurantForm {
    #[validate(custom(function = "required"), length(max = 100))]
    name: String,
    description: Option<String>,
    #[validate(length(max = 100))]
    website: Option<String>,
}

impl RestaurantForm {
    fn new(name: String, description: Option<String>, website: Option<String>) -> Self {
        Self {
            name: name.trim().to_string(),
            description: non_blank(description),
            website: non_blank(website),
        }
    }
}

/// Service for creating, editing and deleting restaurants.
///
/// Every write resolves the city and type it points at first, so a restaurant
/// is never stored with a dangling reference.
pub struct RestaurantService<R, C, T>
where
    R: RestaurantRepository,
    C: CityRepository,
    T: RestaurantTypeRepository,
{
    restaurant_repository: Arc<R>,
    city_repository: Arc<C>,
    type_repository: Arc<T>,
}

impl<R, C, T> RestaurantService<R, C, T>
where
    R: RestaurantRepository,
    C: CityRepository,
    T: RestaurantTypeRepository,
{
    pub fn new(
        restaurant_repository: Arc<R>,
        city_repository: Arc<C>,
        type_repository: Arc<T>,
    ) -> Self {
        Self {
            restaurant_repository,
            city_repository,
            type_repository,
        }
    }

    /// Creates and stores a restaurant.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the name is blank or a field is too long.
    /// Returns [`AppError::ReferenceNotFound`] if the city or the type does not exist.
    /// Nothing is stored on error.
    pub async fn create(
        &self,
        name: String,
        description: Option<String>,
        website: Option<String>,
        street: String,
        city_id: i64,
        type_id: i64,
    ) -> Result<Restaurant, AppError> {
        let form = RestaurantForm::new(name, description, website);
        form.validate()?;

        let city = self.require_city(city_id).await?;
        let restaurant_type = self.require_type(type_id).await?;

        let restaurant = Restaurant::new(
            form.name,
            form.description,
            form.website,
            Address::new(street.trim(), city),
            restaurant_type,
        );

        let saved = self.restaurant_repository.save(restaurant).await?;
        tracing::info!(restaurant_id = ?saved.id, name = %saved.name, "Restaurant created");
        Ok(saved)
    }

    /// Replaces name, description and website. Address and type are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the restaurant does not exist.
    /// Returns [`AppError::Validation`] if the name is blank.
    pub async fn update(
        &self,
        id: i64,
        name: String,
        description: Option<String>,
        website: Option<String>,
    ) -> Result<Restaurant, AppError> {
        let form = RestaurantForm::new(name, description, website);
        form.validate()?;

        let mut restaurant = self.get(id).await?;
        restaurant.name = form.name;
        restaurant.description = form.description;
        restaurant.website = form.website;

        self.restaurant_repository.update_details(&restaurant).await?;
        tracing::info!(restaurant_id = id, "Restaurant updated");
        Ok(restaurant)
    }

    /// Moves the restaurant to a new street and city.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the restaurant does not exist.
    /// Returns [`AppError::ReferenceNotFound`] if the city does not exist.
    pub async fn update_address(
        &self,
        id: i64,
        street: String,
        city_id: i64,
    ) -> Result<Restaurant, AppError> {
        let mut restaurant = self.get(id).await?;
        let city = self.require_city(city_id).await?;
        restaurant.address = Address::new(street.trim(), city);

        self.restaurant_repository.update_details(&restaurant).await?;
        tracing::info!(restaurant_id = id, city_id, "Restaurant address updated");
        Ok(restaurant)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the restaurant does not exist.
    /// Returns [`AppError::ReferenceNotFound`] if the type does not exist.
    pub async fn update_type(&self, id: i64, type_id: i64) -> Result<Restaurant, AppError> {
        let mut restaurant = self.get(id).await?;
        restaurant.restaurant_type = self.require_type(type_id).await?;

        self.restaurant_repository.update_details(&restaurant).await?;
        tracing::info!(restaurant_id = id, type_id, "Restaurant type updated");
        Ok(restaurant)
    }

    /// Deletes a restaurant with all its evaluations and grades.
    ///
    /// Returns `false` if there was nothing to delete.
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let deleted = self.restaurant_repository.delete_by_id(id).await?;

        if deleted {
            tracing::info!(restaurant_id = id, "Restaurant deleted");
        } else {
            tracing::debug!(restaurant_id = id, "Delete skipped, restaurant not found");
        }
        Ok(deleted)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the restaurant does not exist.
    pub async fn get(&self, id: i64) -> Result<Restaurant, AppError> {
        self.restaurant_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Restaurant not found", json!({ "id": id })))
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.restaurant_repository.find_by_id(id).await?.is_some())
    }

    pub async fn list_all(&self) -> Result<Vec<Restaurant>, AppError> {
        self.restaurant_repository.find_all().await
    }

    pub async fn count(&self) -> Result<usize, AppError> {
        Ok(self.restaurant_repository.find_all().await?.len())
    }

    /// Restaurants whose name contains `fragment`, ignoring case.
    pub async fn search_by_name(&self, fragment: &str) -> Result<Vec<Restaurant>, AppError> {
        tracing::debug!(fragment, "Searching restaurants by name");
        self.restaurant_repository.find_by_name(fragment.trim()).await
    }

    /// The restaurant whose name equals `name`, ignoring case.
    pub async fn find_by_exact_name(&self, name: &str) -> Result<Option<Restaurant>, AppError> {
        let name = name.trim();
        Ok(self
            .restaurant_repository
            .find_by_name(name)
            .await?
            .into_iter()
            .find(|r| eq_ignore_case(&r.name, name)))
    }

    pub async fn list_by_city(&self, city_id: i64) -> Result<Vec<Restaurant>, AppError> {
        self.restaurant_repository.find_by_city(city_id).await
    }

    pub async fn list_by_type(&self, type_id: i64) -> Result<Vec<Restaurant>, AppError> {
        self.restaurant_repository.find_by_type(type_id).await
    }

    async fn require_city(&self, city_id: i64) -> Result<City, AppError> {
        self.city_repository
            .find_by_id(city_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(city_id, "Unknown city");
                AppError::reference_not_found("City not found", json!({ "city_id": city_id }))
            })
    }

    async fn require_type(&self, type_id: i64) -> Result<RestaurantType, AppError> {
        self.type_repository
            .find_by_id(type_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(type_id, "Unknown restaurant type");
                AppError::reference_not_found(
                    "Restaurant type not found",
                    json!({ "type_id": type_id }),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{
        MockCityRepository, MockRestaurantRepository, MockRestaurantTypeRepository,
    };

    fn city(id: i64) -> City {
        City {
            id: Some(id),
            zip_code: "2000".to_string(),
            name: "Neuchâtel".to_string(),
        }
    }

    fn pizzeria(id: i64) -> RestaurantType {
        RestaurantType {
            id: Some(id),
            label: "Pizzeria".to_string(),
            description: None,
        }
    }

    fn stored_restaurant(id: i64) -> Restaurant {
        let mut restaurant = Restaurant::new(
            "Chez Mario",
            None,
            None,
            Address::new("Rue du Seyon 1", city(1)),
            pizzeria(1),
        );
        restaurant.set_id(id);
        restaurant
    }

    fn service(
        restaurants: MockRestaurantRepository,
        cities: MockCityRepository,
        types: MockRestaurantTypeRepository,
    ) -> RestaurantService<MockRestaurantRepository, MockCityRepository, MockRestaurantTypeRepository>
    {
        RestaurantService::new(Arc::new(restaurants), Arc::new(cities), Arc::new(types))
    }

    #[tokio::test]
    async fn test_create_success() {
        let mut restaurants = MockRestaurantRepository::new();
        let mut cities = MockCityRepository::new();
        let mut types = MockRestaurantTypeRepository::new();

        cities
            .expect_find_by_id()
            .withf(|id| *id == 1)
            .times(1)
            .returning(|id| Ok(Some(city(id))));
        types
            .expect_find_by_id()
            .withf(|id| *id == 2)
            .times(1)
            .returning(|id| Ok(Some(pizzeria(id))));
        restaurants
            .expect_save()
            .withf(|r| r.id.is_none() && r.name == "Chez Mario" && r.website.is_none())
            .times(1)
            .returning(|mut r| {
                r.set_id(10);
                Ok(r)
            });

        let service = service(restaurants, cities, types);

        let restaurant = service
            .create(
                "  Chez Mario ".to_string(),
                Some("Pizzas".to_string()),
                Some("   ".to_string()),
                "Rue du Seyon 1".to_string(),
                1,
                2,
            )
            .await
            .unwrap();

        assert_eq!(restaurant.id, Some(10));
        assert_eq!(restaurant.address.city.id, Some(1));
        assert_eq!(restaurant.restaurant_type.id, Some(2));
    }

    #[tokio::test]
    async fn test_create_with_unknown_city_stores_nothing() {
        let mut restaurants = MockRestaurantRepository::new();
        let mut cities = MockCityRepository::new();
        let types = MockRestaurantTypeRepository::new();

        cities.expect_find_by_id().times(1).returning(|_| Ok(None));
        restaurants.expect_save().times(0);

        let service = service(restaurants, cities, types);

        let result = service
            .create("Chez Mario".to_string(), None, None, String::new(), 99, 1)
            .await;

        assert!(matches!(result, Err(AppError::ReferenceNotFound { .. })));
    }

    #[tokio::test]
    async fn test_create_with_unknown_type_stores_nothing() {
        let mut restaurants = MockRestaurantRepository::new();
        let mut cities = MockCityRepository::new();
        let mut types = MockRestaurantTypeRepository::new();

        cities
            .expect_find_by_id()
            .returning(|id| Ok(Some(city(id))));
        types.expect_find_by_id().times(1).returning(|_| Ok(None));
        restaurants.expect_save().times(0);

        let service = service(restaurants, cities, types);

        let result = service
            .create("Chez Mario".to_string(), None, None, String::new(), 1, 42)
            .await;

        assert!(matches!(result, Err(AppError::ReferenceNotFound { .. })));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let mut restaurants = MockRestaurantRepository::new();
        let mut cities = MockCityRepository::new();
        let types = MockRestaurantTypeRepository::new();

        cities.expect_find_by_id().times(0);
        restaurants.expect_save().times(0);

        let service = service(restaurants, cities, types);

        let result = service
            .create("   ".to_string(), None, None, String::new(), 1, 1)
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_update_keeps_address_and_type() {
        let mut restaurants = MockRestaurantRepository::new();

        restaurants
            .expect_find_by_id()
            .returning(|id| Ok(Some(stored_restaurant(id))));
        restaurants
            .expect_update_details()
            .withf(|r| {
                r.name == "Chez Luigi"
                    && r.website.as_deref() == Some("https://luigi.ch")
                    && r.address.street == "Rue du Seyon 1"
                    && r.restaurant_type.label == "Pizzeria"
            })
            .times(1)
            .returning(|_| Ok(()));
        restaurants.expect_save().times(0);

        let service = service(
            restaurants,
            MockCityRepository::new(),
            MockRestaurantTypeRepository::new(),
        );

        let updated = service
            .update(
                5,
                "Chez Luigi".to_string(),
                None,
                Some("https://luigi.ch".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(updated.id, Some(5));
    }

    #[tokio::test]
    async fn test_update_missing_restaurant() {
        let mut restaurants = MockRestaurantRepository::new();
        restaurants.expect_find_by_id().returning(|_| Ok(None));
        restaurants.expect_update_details().times(0);

        let service = service(
            restaurants,
            MockCityRepository::new(),
            MockRestaurantTypeRepository::new(),
        );

        let result = service
            .update(404, "Anything".to_string(), None, None)
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_address_with_unknown_city() {
        let mut restaurants = MockRestaurantRepository::new();
        let mut cities = MockCityRepository::new();

        restaurants
            .expect_find_by_id()
            .returning(|id| Ok(Some(stored_restaurant(id))));
        cities.expect_find_by_id().returning(|_| Ok(None));
        restaurants.expect_update_details().times(0);

        let service = service(restaurants, cities, MockRestaurantTypeRepository::new());

        let result = service
            .update_address(1, "Place Pury 3".to_string(), 77)
            .await;

        assert!(matches!(result, Err(AppError::ReferenceNotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_type() {
        let mut restaurants = MockRestaurantRepository::new();
        let mut types = MockRestaurantTypeRepository::new();

        restaurants
            .expect_find_by_id()
            .returning(|id| Ok(Some(stored_restaurant(id))));
        types.expect_find_by_id().returning(|id| {
            Ok(Some(RestaurantType {
                id: Some(id),
                label: "Brasserie".to_string(),
                description: None,
            }))
        });
        restaurants
            .expect_update_details()
            .withf(|r| r.restaurant_type.id == Some(3))
            .times(1)
            .returning(|_| Ok(()));

        let service = service(restaurants, MockCityRepository::new(), types);

        let updated = service.update_type(1, 3).await.unwrap();

        assert_eq!(updated.restaurant_type.id, Some(3));
        assert_eq!(updated.restaurant_type.label, "Brasserie");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let mut restaurants = MockRestaurantRepository::new();
        restaurants
            .expect_delete_by_id()
            .withf(|id| *id == 1)
            .returning(|_| Ok(true));
        restaurants
            .expect_delete_by_id()
            .withf(|id| *id == 2)
            .returning(|_| Ok(false));

        let service = service(
            restaurants,
            MockCityRepository::new(),
            MockRestaurantTypeRepository::new(),
        );

        assert!(service.delete(1).await.unwrap());
        assert!(!service.delete(2).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_by_exact_name_ignores_partial_matches() {
        let mut restaurants = MockRestaurantRepository::new();
        restaurants.expect_find_by_name().returning(|_| {
            let mut other = stored_restaurant(2);
            other.name = "Chez Mario II".to_string();
            Ok(vec![other, stored_restaurant(1)])
        });

        let service = service(
            restaurants,
            MockCityRepository::new(),
            MockRestaurantTypeRepository::new(),
        );

        let found = service.find_by_exact_name("chez mario").await.unwrap();

        assert_eq!(found.and_then(|r| r.id), Some(1));
    }
}

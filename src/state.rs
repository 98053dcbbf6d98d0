//! Shared application state: the services wired to their SQLite repositories.

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::application::services::{CatalogService, EvaluationService, RestaurantService};
use crate::infrastructure::origin::{LocalAddressOrigin, OriginResolver};
use crate::infrastructure::persistence::{
    SqliteCityRepository, SqliteCriterionRepository, SqliteRestaurantRepository,
    SqliteRestaurantTypeRepository,
};

pub type AppRestaurantService = RestaurantService<
    SqliteRestaurantRepository,
    SqliteCityRepository,
    SqliteRestaurantTypeRepository,
>;
pub type AppEvaluationService =
    EvaluationService<SqliteRestaurantRepository, SqliteCriterionRepository>;
pub type AppCatalogService = CatalogService<
    SqliteCityRepository,
    SqliteRestaurantTypeRepository,
    SqliteCriterionRepository,
>;

#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<SqlitePool>,
    pub restaurants: Arc<AppRestaurantService>,
    pub evaluations: Arc<AppEvaluationService>,
    pub catalog: Arc<AppCatalogService>,
}

impl AppState {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self::with_origin(pool, Arc::new(LocalAddressOrigin))
    }

    /// Builds the state with a custom vote origin source.
    pub fn with_origin(pool: Arc<SqlitePool>, origin: Arc<dyn OriginResolver>) -> Self {
        let restaurant_repository = Arc::new(SqliteRestaurantRepository::new(pool.clone()));
        let city_repository = Arc::new(SqliteCityRepository::new(pool.clone()));
        let type_repository = Arc::new(SqliteRestaurantTypeRepository::new(pool.clone()));
        let criterion_repository = Arc::new(SqliteCriterionRepository::new(pool.clone()));

        let restaurants = Arc::new(RestaurantService::new(
            restaurant_repository.clone(),
            city_repository.clone(),
            type_repository.clone(),
        ));
        let evaluations = Arc::new(EvaluationService::with_origin(
            restaurant_repository,
            criterion_repository.clone(),
            origin,
        ));
        let catalog = Arc::new(CatalogService::new(
            city_repository,
            type_repository,
            criterion_repository,
        ));

        Self {
            pool,
            restaurants,
            evaluations,
            catalog,
        }
    }
}

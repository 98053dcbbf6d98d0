#![allow(dead_code)]

use guideresto::domain::entities::{City, RestaurantType};
use guideresto::domain::repositories::{CityRepository, RestaurantTypeRepository};
use guideresto::infrastructure::database::connect_in_memory;
use guideresto::infrastructure::persistence::{
    SqliteCityRepository, SqliteCriterionRepository, SqliteEvaluationRepository,
    SqliteRestaurantRepository, SqliteRestaurantTypeRepository,
};
use guideresto::state::AppState;
use sqlx::SqlitePool;
use std::sync::Arc;

pub const TEST_ORIGIN: &str = "127.0.0.1";

/// Fresh migrated in-memory database.
pub async fn setup_pool() -> Arc<SqlitePool> {
    Arc::new(connect_in_memory().await.unwrap())
}

pub struct Repositories {
    pub restaurants: SqliteRestaurantRepository,
    pub evaluations: SqliteEvaluationRepository,
    pub cities: SqliteCityRepository,
    pub types: SqliteRestaurantTypeRepository,
    pub criteria: SqliteCriterionRepository,
}

pub fn repositories(pool: &Arc<SqlitePool>) -> Repositories {
    Repositories {
        restaurants: SqliteRestaurantRepository::new(pool.clone()),
        evaluations: SqliteEvaluationRepository::new(pool.clone()),
        cities: SqliteCityRepository::new(pool.clone()),
        types: SqliteRestaurantTypeRepository::new(pool.clone()),
        criteria: SqliteCriterionRepository::new(pool.clone()),
    }
}

/// Services wired to the pool, recording a fixed vote origin.
pub fn create_test_state(pool: Arc<SqlitePool>) -> AppState {
    AppState::with_origin(pool, Arc::new(|| Some(TEST_ORIGIN.to_string())))
}

pub async fn create_test_city(pool: &Arc<SqlitePool>, zip_code: &str, name: &str) -> City {
    SqliteCityRepository::new(pool.clone())
        .save(City::new(zip_code, name))
        .await
        .unwrap()
}

pub async fn create_test_type(pool: &Arc<SqlitePool>, label: &str) -> RestaurantType {
    SqliteRestaurantTypeRepository::new(pool.clone())
        .save(RestaurantType::new(label, None))
        .await
        .unwrap()
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

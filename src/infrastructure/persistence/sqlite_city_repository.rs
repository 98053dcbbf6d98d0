//! SQLite implementation of the city repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::SqlitePool;
use std::sync::Arc;

use super::rows::CityRow;
use crate::domain::entities::City;
use crate::domain::repositories::CityRepository;
use crate::error::AppError;
use crate::utils::text::{contains_ignore_case, eq_ignore_case};

/// SQLite repository for cities.
///
/// Deleting a city that restaurants still reference fails with
/// [`AppError::Conflict`] (enforced by the foreign key).
pub struct SqliteCityRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteCityRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CityRepository for SqliteCityRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<City>, AppError> {
        let row: Option<CityRow> =
            sqlx::query_as("SELECT id, zip_code, name FROM cities WHERE id = ?")
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(City::from))
    }

    async fn find_all(&self) -> Result<Vec<City>, AppError> {
        let rows: Vec<CityRow> =
            sqlx::query_as("SELECT id, zip_code, name FROM cities ORDER BY name, zip_code")
                .fetch_all(self.pool.as_ref())
                .await?;

        Ok(rows.into_iter().map(City::from).collect())
    }

    async fn save(&self, mut city: City) -> Result<City, AppError> {
        match city.id {
            None => {
                let id: i64 = sqlx::query_scalar(
                    "INSERT INTO cities (zip_code, name) VALUES (?, ?) RETURNING id",
                )
                .bind(&city.zip_code)
                .bind(&city.name)
                .fetch_one(self.pool.as_ref())
                .await?;

                city.id = Some(id);
            }
            Some(id) => {
                let result = sqlx::query("UPDATE cities SET zip_code = ?, name = ? WHERE id = ?")
                    .bind(&city.zip_code)
                    .bind(&city.name)
                    .bind(id)
                    .execute(self.pool.as_ref())
                    .await?;

                if result.rows_affected() == 0 {
                    return Err(AppError::not_found("City not found", json!({ "id": id })));
                }
            }
        }

        Ok(city)
    }

    async fn delete(&self, city: &City) -> Result<(), AppError> {
        if let Some(id) = city.id {
            self.delete_by_id(id).await?;
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM cities WHERE id = ?")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_zip_code(&self, zip_code: &str) -> Result<Option<City>, AppError> {
        let row: Option<CityRow> = sqlx::query_as(
            "SELECT id, zip_code, name FROM cities WHERE zip_code = ? ORDER BY id LIMIT 1",
        )
        .bind(zip_code.trim())
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(City::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<City>, AppError> {
        Ok(self
            .find_all()
            .await?
            .into_iter()
            .filter(|city| contains_ignore_case(&city.name, name))
            .collect())
    }

    async fn find_by_exact_name(&self, name: &str) -> Result<Option<City>, AppError> {
        Ok(self
            .find_all()
            .await?
            .into_iter()
            .find(|city| eq_ignore_case(&city.name, name.trim())))
    }
}

//! SQLite implementation of the restaurant type repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::SqlitePool;
use std::sync::Arc;

use super::rows::RestaurantTypeRow;
use crate::domain::entities::RestaurantType;
use crate::domain::repositories::RestaurantTypeRepository;
use crate::error::AppError;
use crate::utils::text::{contains_ignore_case, eq_ignore_case};

pub struct SqliteRestaurantTypeRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteRestaurantTypeRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RestaurantTypeRepository for SqliteRestaurantTypeRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<RestaurantType>, AppError> {
        let row: Option<RestaurantTypeRow> =
            sqlx::query_as("SELECT id, label, description FROM restaurant_types WHERE id = ?")
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(RestaurantType::from))
    }

    async fn find_all(&self) -> Result<Vec<RestaurantType>, AppError> {
        let rows: Vec<RestaurantTypeRow> =
            sqlx::query_as("SELECT id, label, description FROM restaurant_types ORDER BY label")
                .fetch_all(self.pool.as_ref())
                .await?;

        Ok(rows.into_iter().map(RestaurantType::from).collect())
    }

    async fn save(&self, mut restaurant_type: RestaurantType) -> Result<RestaurantType, AppError> {
        match restaurant_type.id {
            None => {
                let id: i64 = sqlx::query_scalar(
                    "INSERT INTO restaurant_types (label, description) VALUES (?, ?) RETURNING id",
                )
                .bind(&restaurant_type.label)
                .bind(&restaurant_type.description)
                .fetch_one(self.pool.as_ref())
                .await?;

                restaurant_type.id = Some(id);
            }
            Some(id) => {
                let result = sqlx::query(
                    "UPDATE restaurant_types SET label = ?, description = ? WHERE id = ?",
                )
                .bind(&restaurant_type.label)
                .bind(&restaurant_type.description)
                .bind(id)
                .execute(self.pool.as_ref())
                .await?;

                if result.rows_affected() == 0 {
                    return Err(AppError::not_found(
                        "Restaurant type not found",
                        json!({ "id": id }),
                    ));
                }
            }
        }

        Ok(restaurant_type)
    }

    async fn delete(&self, restaurant_type: &RestaurantType) -> Result<(), AppError> {
        if let Some(id) = restaurant_type.id {
            self.delete_by_id(id).await?;
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM restaurant_types WHERE id = ?")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_label(&self, label: &str) -> Result<Vec<RestaurantType>, AppError> {
        Ok(self
            .find_all()
            .await?
            .into_iter()
            .filter(|t| contains_ignore_case(&t.label, label))
            .collect())
    }

    async fn find_by_exact_label(
        &self,
        label: &str,
    ) -> Result<Option<RestaurantType>, AppError> {
        Ok(self
            .find_all()
            .await?
            .into_iter()
            .find(|t| eq_ignore_case(&t.label, label.trim())))
    }
}

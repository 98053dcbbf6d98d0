//! SQLite implementation of the criterion catalog.

use async_trait::async_trait;
use serde_json::json;
use sqlx::SqlitePool;
use std::sync::Arc;

use super::rows::CriterionRow;
use crate::domain::entities::Criterion;
use crate::domain::repositories::CriterionRepository;
use crate::error::AppError;
use crate::utils::text::{contains_ignore_case, eq_ignore_case};

/// SQLite repository for evaluation criteria.
///
/// Names are unique regardless of case. A criterion still used by a grade
/// cannot be deleted.
pub struct SqliteCriterionRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteCriterionRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CriterionRepository for SqliteCriterionRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Criterion>, AppError> {
        let row: Option<CriterionRow> =
            sqlx::query_as("SELECT id, name, description FROM criteria WHERE id = ?")
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(Criterion::from))
    }

    async fn find_all(&self) -> Result<Vec<Criterion>, AppError> {
        let rows: Vec<CriterionRow> =
            sqlx::query_as("SELECT id, name, description FROM criteria ORDER BY name")
                .fetch_all(self.pool.as_ref())
                .await?;

        Ok(rows.into_iter().map(Criterion::from).collect())
    }

    async fn save(&self, mut criterion: Criterion) -> Result<Criterion, AppError> {
        match criterion.id {
            None => {
                let id: i64 = sqlx::query_scalar(
                    "INSERT INTO criteria (name, description) VALUES (?, ?) RETURNING id",
                )
                .bind(&criterion.name)
                .bind(&criterion.description)
                .fetch_one(self.pool.as_ref())
                .await?;

                criterion.id = Some(id);
            }
            Some(id) => {
                let result =
                    sqlx::query("UPDATE criteria SET name = ?, description = ? WHERE id = ?")
                        .bind(&criterion.name)
                        .bind(&criterion.description)
                        .bind(id)
                        .execute(self.pool.as_ref())
                        .await?;

                if result.rows_affected() == 0 {
                    return Err(AppError::not_found(
                        "Criterion not found",
                        json!({ "id": id }),
                    ));
                }
            }
        }

        Ok(criterion)
    }

    async fn delete(&self, criterion: &Criterion) -> Result<(), AppError> {
        if let Some(id) = criterion.id {
            self.delete_by_id(id).await?;
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM criteria WHERE id = ?")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Criterion>, AppError> {
        Ok(self
            .find_all()
            .await?
            .into_iter()
            .filter(|c| contains_ignore_case(&c.name, name))
            .collect())
    }

    async fn find_by_exact_name(&self, name: &str) -> Result<Option<Criterion>, AppError> {
        Ok(self
            .find_all()
            .await?
            .into_iter()
            .find(|c| eq_ignore_case(&c.name, name.trim())))
    }
}

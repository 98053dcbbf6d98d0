//! SQLite implementation of the read-only evaluation repository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;

use super::rows::{EVALUATION_COLUMNS, EvaluationRow, GRADE_COLUMNS, GradeRow, load_evaluations};
use crate::domain::entities::{Evaluation, Grade};
use crate::domain::repositories::EvaluationRepository;
use crate::error::AppError;

pub struct SqliteEvaluationRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteEvaluationRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EvaluationRepository for SqliteEvaluationRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Evaluation>, AppError> {
        let mut conn = self.pool.acquire().await?;

        let row: Option<EvaluationRow> =
            sqlx::query_as(&format!("{EVALUATION_COLUMNS} WHERE id = ?"))
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let grade_rows: Vec<GradeRow> =
            sqlx::query_as(&format!("{GRADE_COLUMNS} WHERE g.evaluation_id = ? ORDER BY g.id"))
                .bind(id)
                .fetch_all(&mut *conn)
                .await?;

        let grades = grade_rows
            .into_iter()
            .map(Grade::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        row.into_evaluation(grades).map(Some)
    }

    async fn find_by_restaurant(&self, restaurant_id: i64) -> Result<Vec<Evaluation>, AppError> {
        let mut conn = self.pool.acquire().await?;
        load_evaluations(&mut conn, restaurant_id).await
    }

    async fn find_grade_by_id(&self, id: i64) -> Result<Option<Grade>, AppError> {
        let row: Option<GradeRow> = sqlx::query_as(&format!("{GRADE_COLUMNS} WHERE g.id = ?"))
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Grade::try_from).transpose()
    }
}

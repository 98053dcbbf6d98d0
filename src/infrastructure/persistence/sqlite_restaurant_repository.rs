//! SQLite implementation of the restaurant repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::{SqliteConnection, SqlitePool};
use std::sync::Arc;

use super::rows::{RESTAURANT_COLUMNS, RestaurantRow, load_evaluations};
use crate::domain::entities::{Evaluation, Restaurant};
use crate::domain::repositories::RestaurantRepository;
use crate::error::AppError;
use crate::utils::text::contains_ignore_case;

/// SQLite repository for the restaurant aggregate.
///
/// Writes run in a single transaction covering the restaurant row, its
/// evaluations and their grades. Dropping the transaction on any error path
/// rolls everything back.
pub struct SqliteRestaurantRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteRestaurantRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Loads restaurants matching `filter`, binding `param` to its placeholder if given.
    async fn fetch(&self, filter: &str, param: Option<i64>) -> Result<Vec<Restaurant>, AppError> {
        let mut conn = self.pool.acquire().await?;

        let sql = format!("{RESTAURANT_COLUMNS} {filter} ORDER BY r.name, r.id");
        let mut query = sqlx::query_as::<_, RestaurantRow>(&sql);
        if let Some(param) = param {
            query = query.bind(param);
        }
        let rows = query.fetch_all(&mut *conn).await?;

        let mut restaurants = Vec::with_capacity(rows.len());
        for row in rows {
            let evaluations = load_evaluations(&mut conn, row.id).await?;
            restaurants.push(row.into_restaurant(evaluations));
        }

        Ok(restaurants)
    }
}

fn restaurant_not_found(id: i64) -> AppError {
    AppError::not_found("Restaurant not found", json!({ "id": id }))
}

/// Storage ids of the city and type, which must both be saved already.
fn reference_ids(restaurant: &Restaurant) -> Result<(i64, i64), AppError> {
    let city_id = restaurant.address.city.id.ok_or_else(|| {
        AppError::reference_not_found(
            "City has not been saved",
            json!({ "city": restaurant.address.city.name }),
        )
    })?;
    let type_id = restaurant.restaurant_type.id.ok_or_else(|| {
        AppError::reference_not_found(
            "Restaurant type has not been saved",
            json!({ "type": restaurant.restaurant_type.label }),
        )
    })?;

    Ok((city_id, type_id))
}

/// Rewrites the restaurant row only. Returns `false` if no row has this id.
async fn update_row(
    conn: &mut SqliteConnection,
    restaurant: &Restaurant,
    id: i64,
    city_id: i64,
    type_id: i64,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE restaurants SET
            name = ?, description = ?, website = ?, street = ?,
            city_id = ?, type_id = ?
        WHERE id = ?
        "#,
    )
    .bind(&restaurant.name)
    .bind(&restaurant.description)
    .bind(&restaurant.website)
    .bind(&restaurant.address.street)
    .bind(city_id)
    .bind(type_id)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

async fn insert_evaluation(
    conn: &mut SqliteConnection,
    restaurant_id: i64,
    evaluation: &mut Evaluation,
) -> Result<(), AppError> {
    let id: i64 = match &*evaluation {
        Evaluation::Vote(vote) => {
            sqlx::query_scalar(
                r#"
                INSERT INTO evaluations (restaurant_id, visited_at, kind, liked, origin)
                VALUES (?, ?, 'vote', ?, ?)
                RETURNING id
                "#,
            )
            .bind(restaurant_id)
            .bind(vote.visited_at)
            .bind(vote.liked)
            .bind(&vote.origin)
            .fetch_one(&mut *conn)
            .await?
        }
        Evaluation::Review(review) => {
            sqlx::query_scalar(
                r#"
                INSERT INTO evaluations (restaurant_id, visited_at, kind, username, comment)
                VALUES (?, ?, 'review', ?, ?)
                RETURNING id
                "#,
            )
            .bind(restaurant_id)
            .bind(review.visited_at)
            .bind(&review.username)
            .bind(&review.comment)
            .fetch_one(&mut *conn)
            .await?
        }
    };

    evaluation.set_id(id);

    if let Evaluation::Review(review) = evaluation {
        for grade in review.grades_mut() {
            let criterion_id = grade.criterion.id.ok_or_else(|| {
                AppError::unknown_criterion(
                    "Criterion has not been saved",
                    json!({ "criterion": grade.criterion.name }),
                )
            })?;

            let grade_id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO grades (evaluation_id, criterion_id, value)
                VALUES (?, ?, ?)
                RETURNING id
                "#,
            )
            .bind(id)
            .bind(criterion_id)
            .bind(i64::from(grade.score.value()))
            .fetch_one(&mut *conn)
            .await?;

            grade.id = Some(grade_id);
        }
    }

    Ok(())
}

#[async_trait]
impl RestaurantRepository for SqliteRestaurantRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Restaurant>, AppError> {
        Ok(self
            .fetch("WHERE r.id = ?", Some(id))
            .await?
            .into_iter()
            .next())
    }

    async fn find_all(&self) -> Result<Vec<Restaurant>, AppError> {
        self.fetch("", None).await
    }

    async fn save(&self, mut restaurant: Restaurant) -> Result<Restaurant, AppError> {
        let (city_id, type_id) = reference_ids(&restaurant)?;

        let mut tx = self.pool.begin().await?;

        let restaurant_id = match restaurant.id {
            None => {
                let id: i64 = sqlx::query_scalar(
                    r#"
                    INSERT INTO restaurants (name, description, website, street, city_id, type_id)
                    VALUES (?, ?, ?, ?, ?, ?)
                    RETURNING id
                    "#,
                )
                .bind(&restaurant.name)
                .bind(&restaurant.description)
                .bind(&restaurant.website)
                .bind(&restaurant.address.street)
                .bind(city_id)
                .bind(type_id)
                .fetch_one(&mut *tx)
                .await?;

                restaurant.set_id(id);
                id
            }
            Some(id) => {
                if !update_row(&mut tx, &restaurant, id, city_id, type_id).await? {
                    tx.rollback().await?;
                    return Err(restaurant_not_found(id));
                }

                // Evaluations attached before the first save carry no back-reference.
                restaurant.set_id(id);
                id
            }
        };

        // Orphan removal: stored evaluations that left the collection are deleted.
        let kept: Vec<i64> = restaurant
            .evaluations()
            .iter()
            .filter_map(Evaluation::id)
            .collect();
        let stored: Vec<i64> =
            sqlx::query_scalar("SELECT id FROM evaluations WHERE restaurant_id = ?")
                .bind(restaurant_id)
                .fetch_all(&mut *tx)
                .await?;

        for stale in stored.into_iter().filter(|id| !kept.contains(id)) {
            sqlx::query("DELETE FROM evaluations WHERE id = ?")
                .bind(stale)
                .execute(&mut *tx)
                .await?;
        }

        for evaluation in restaurant.evaluations_mut() {
            if evaluation.id().is_none() {
                insert_evaluation(&mut tx, restaurant_id, evaluation).await?;
            }
        }

        tx.commit().await?;

        tracing::debug!(
            restaurant_id,
            evaluations = restaurant.evaluations().len(),
            "Restaurant saved"
        );

        Ok(restaurant)
    }

    async fn update_details(&self, restaurant: &Restaurant) -> Result<(), AppError> {
        let id = restaurant.id.ok_or_else(|| {
            AppError::not_found(
                "Restaurant has not been saved",
                json!({ "name": restaurant.name }),
            )
        })?;
        let (city_id, type_id) = reference_ids(restaurant)?;

        let mut conn = self.pool.acquire().await?;
        if !update_row(&mut conn, restaurant, id, city_id, type_id).await? {
            return Err(restaurant_not_found(id));
        }

        tracing::debug!(restaurant_id = id, "Restaurant details updated");
        Ok(())
    }

    async fn delete(&self, restaurant: &Restaurant) -> Result<(), AppError> {
        if let Some(id) = restaurant.id {
            self.delete_by_id(id).await?;
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM restaurants WHERE id = ?")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Restaurant>, AppError> {
        // Filtered in Rust: SQLite's LIKE only folds ASCII case.
        Ok(self
            .find_all()
            .await?
            .into_iter()
            .filter(|r| contains_ignore_case(&r.name, name))
            .collect())
    }

    async fn find_by_city(&self, city_id: i64) -> Result<Vec<Restaurant>, AppError> {
        self.fetch("WHERE r.city_id = ?", Some(city_id)).await
    }

    async fn find_by_type(&self, type_id: i64) -> Result<Vec<Restaurant>, AppError> {
        self.fetch("WHERE r.type_id = ?", Some(type_id)).await
    }
}

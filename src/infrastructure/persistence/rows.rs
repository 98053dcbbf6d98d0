//! Row types shared by the SQLite repositories and their conversion into entities.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, SqliteConnection};

use crate::domain::entities::{
    Address, City, Criterion, Evaluation, Grade, Restaurant, RestaurantType, Review, Score, Vote,
};
use crate::error::AppError;

/// Columns selected for a restaurant, its city and its type.
pub(crate) const RESTAURANT_COLUMNS: &str = r#"
    SELECT r.id, r.name, r.description, r.website, r.street,
           c.id AS city_id, c.zip_code AS city_zip_code, c.name AS city_name,
           t.id AS type_id, t.label AS type_label, t.description AS type_description
    FROM restaurants r
    JOIN cities c ON c.id = r.city_id
    JOIN restaurant_types t ON t.id = r.type_id
"#;

pub(crate) const EVALUATION_COLUMNS: &str = r#"
    SELECT id, restaurant_id, visited_at, kind, liked, origin, username, comment
    FROM evaluations
"#;

pub(crate) const GRADE_COLUMNS: &str = r#"
    SELECT g.id, g.evaluation_id, g.value,
           c.id AS criterion_id, c.name AS criterion_name,
           c.description AS criterion_description
    FROM grades g
    JOIN criteria c ON c.id = g.criterion_id
"#;

#[derive(Debug, FromRow)]
pub(crate) struct CityRow {
    pub id: i64,
    pub zip_code: String,
    pub name: String,
}

impl From<CityRow> for City {
    fn from(row: CityRow) -> Self {
        City {
            id: Some(row.id),
            zip_code: row.zip_code,
            name: row.name,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct RestaurantTypeRow {
    pub id: i64,
    pub label: String,
    pub description: Option<String>,
}

impl From<RestaurantTypeRow> for RestaurantType {
    fn from(row: RestaurantTypeRow) -> Self {
        RestaurantType {
            id: Some(row.id),
            label: row.label,
            description: row.description,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct CriterionRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<CriterionRow> for Criterion {
    fn from(row: CriterionRow) -> Self {
        Criterion {
            id: Some(row.id),
            name: row.name,
            description: row.description,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct RestaurantRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub street: String,
    pub city_id: i64,
    pub city_zip_code: String,
    pub city_name: String,
    pub type_id: i64,
    pub type_label: String,
    pub type_description: Option<String>,
}

impl RestaurantRow {
    /// Builds the restaurant and attaches its already-loaded evaluations.
    pub fn into_restaurant(self, evaluations: Vec<Evaluation>) -> Restaurant {
        let city = City {
            id: Some(self.city_id),
            zip_code: self.city_zip_code,
            name: self.city_name,
        };
        let restaurant_type = RestaurantType {
            id: Some(self.type_id),
            label: self.type_label,
            description: self.type_description,
        };

        let mut restaurant = Restaurant::new(
            self.name,
            self.description,
            self.website,
            Address::new(self.street, city),
            restaurant_type,
        );
        restaurant.set_id(self.id);
        for evaluation in evaluations {
            restaurant.add_evaluation(evaluation);
        }
        restaurant
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct EvaluationRow {
    pub id: i64,
    pub restaurant_id: i64,
    pub visited_at: DateTime<Utc>,
    pub kind: String,
    pub liked: Option<bool>,
    pub origin: Option<String>,
    pub username: Option<String>,
    pub comment: Option<String>,
}

impl EvaluationRow {
    pub fn into_evaluation(self, grades: Vec<Grade>) -> Result<Evaluation, AppError> {
        match self.kind.as_str() {
            "vote" => Ok(Evaluation::Vote(Vote {
                id: Some(self.id),
                restaurant_id: Some(self.restaurant_id),
                visited_at: self.visited_at,
                liked: self.liked.unwrap_or(false),
                origin: self.origin.unwrap_or_default(),
            })),
            "review" => {
                let mut review = Review::new(
                    self.username.unwrap_or_default(),
                    self.comment.unwrap_or_default(),
                    self.visited_at,
                );
                review.id = Some(self.id);
                review.restaurant_id = Some(self.restaurant_id);
                for grade in grades {
                    review.add_grade(grade)?;
                }
                Ok(Evaluation::Review(review))
            }
            other => Err(AppError::Storage(sqlx::Error::Decode(
                format!("unknown evaluation kind '{other}' for evaluation {}", self.id).into(),
            ))),
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct GradeRow {
    pub id: i64,
    pub evaluation_id: i64,
    pub value: i64,
    pub criterion_id: i64,
    pub criterion_name: String,
    pub criterion_description: Option<String>,
}

impl TryFrom<GradeRow> for Grade {
    type Error = AppError;

    fn try_from(row: GradeRow) -> Result<Self, Self::Error> {
        let score = Score::try_from(row.value).map_err(|_| {
            AppError::Storage(sqlx::Error::Decode(
                json!({ "grade": row.id, "value": row.value })
                    .to_string()
                    .into(),
            ))
        })?;

        Ok(Grade {
            id: Some(row.id),
            review_id: Some(row.evaluation_id),
            criterion: Criterion {
                id: Some(row.criterion_id),
                name: row.criterion_name,
                description: row.criterion_description,
            },
            score,
        })
    }
}

/// Loads every evaluation of a restaurant with its grades, oldest first.
pub(crate) async fn load_evaluations(
    conn: &mut SqliteConnection,
    restaurant_id: i64,
) -> Result<Vec<Evaluation>, AppError> {
    let rows: Vec<EvaluationRow> = sqlx::query_as(&format!(
        "{EVALUATION_COLUMNS} WHERE restaurant_id = ? ORDER BY visited_at, id"
    ))
    .bind(restaurant_id)
    .fetch_all(&mut *conn)
    .await?;

    let grade_rows: Vec<GradeRow> = sqlx::query_as(&format!(
        "{GRADE_COLUMNS} JOIN evaluations e ON e.id = g.evaluation_id \
         WHERE e.restaurant_id = ? ORDER BY g.id"
    ))
    .bind(restaurant_id)
    .fetch_all(&mut *conn)
    .await?;

    let mut grades_by_evaluation: HashMap<i64, Vec<Grade>> = HashMap::new();
    for row in grade_rows {
        let evaluation_id = row.evaluation_id;
        grades_by_evaluation
            .entry(evaluation_id)
            .or_default()
            .push(Grade::try_from(row)?);
    }

    rows.into_iter()
        .map(|row| {
            let grades = grades_by_evaluation.remove(&row.id).unwrap_or_default();
            row.into_evaluation(grades)
        })
        .collect()
}

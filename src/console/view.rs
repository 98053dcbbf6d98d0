//! Serializable views of restaurants and reference data.
//!
//! Used both for text rendering and for `--json` output.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::entities::{Criterion, Restaurant, Review};
use crate::domain::statistics::RatingSummary;

/// One line of a restaurant listing.
#[derive(Debug, Serialize)]
pub struct RestaurantListItem {
    pub id: Option<i64>,
    pub name: String,
    pub city: String,
    pub restaurant_type: String,
}

impl From<&Restaurant> for RestaurantListItem {
    fn from(restaurant: &Restaurant) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name.clone(),
            city: restaurant.address.city.display_name(),
            restaurant_type: restaurant.restaurant_type.label.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewView {
    pub id: Option<i64>,
    pub username: String,
    pub comment: String,
    pub visited_at: DateTime<Utc>,
    pub grades: BTreeMap<String, u8>,
}

impl From<&Review> for ReviewView {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id,
            username: review.username.clone(),
            comment: review.comment.clone(),
            visited_at: review.visited_at,
            grades: review
                .grades()
                .iter()
                .map(|g| (g.criterion.name.clone(), g.score.value()))
                .collect(),
        }
    }
}

/// Full restaurant detail with its rating statistics.
#[derive(Debug, Serialize)]
pub struct RestaurantView {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub street: String,
    pub city: String,
    pub restaurant_type: String,
    pub likes: usize,
    pub dislikes: usize,
    pub reviews: usize,
    pub total_evaluations: usize,
    /// `None` when no review carries a grade.
    pub overall_average: Option<f64>,
    pub criterion_averages: BTreeMap<String, f64>,
    pub review_details: Vec<ReviewView>,
}

impl RestaurantView {
    pub fn new(restaurant: &Restaurant, summary: RatingSummary) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name.clone(),
            description: restaurant.description.clone(),
            website: restaurant.website.clone(),
            street: restaurant.address.street.clone(),
            city: restaurant.address.city.display_name(),
            restaurant_type: restaurant.restaurant_type.label.clone(),
            likes: summary.likes,
            dislikes: summary.dislikes,
            reviews: summary.reviews,
            total_evaluations: summary.total,
            overall_average: summary.overall_average,
            criterion_averages: summary.criterion_averages,
            review_details: restaurant.reviews().map(ReviewView::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CriterionView {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
}

impl From<&Criterion> for CriterionView {
    fn from(criterion: &Criterion) -> Self {
        Self {
            id: criterion.id,
            name: criterion.name.clone(),
            description: criterion.description.clone(),
        }
    }
}

//! Vote and review submission, plus the rating read side.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use validator::Validate;

use crate::domain::entities::{Evaluation, Grade, Restaurant, Review, Score, Vote};
use crate::domain::repositories::{CriterionRepository, RestaurantRepository};
use crate::domain::statistics::{self, RatingSummary};
use crate::error::AppError;
use crate::infrastructure::origin::{LocalAddressOrigin, OriginResolver, resolve_or_unavailable};
use crate::utils::text::required;

#[derive(Debug, Validate)]
struct ReviewForm {
    #[validate(custom(function = "required"), length(max = 100))]
    username: String,
}

/// Service for attaching evaluations to restaurants and reading their ratings.
///
/// Evaluations are written through the restaurant aggregate: the service loads
/// the restaurant, attaches the new vote or review, and saves the whole
/// aggregate in one transaction.
///
/// Read operations never fail on a missing restaurant. They return zero, an
/// empty list or an empty summary instead.
pub struct EvaluationService<R, C>
where
    R: RestaurantRepository,
    C: CriterionRepository,
{
    restaurant_repository: Arc<R>,
    criterion_repository: Arc<C>,
    origin: Arc<dyn OriginResolver>,
}

impl<R, C> EvaluationService<R, C>
where
    R: RestaurantRepository,
    C: CriterionRepository,
{
    /// Creates a service that records the local network address with each vote.
    pub fn new(restaurant_repository: Arc<R>, criterion_repository: Arc<C>) -> Self {
        Self::with_origin(
            restaurant_repository,
            criterion_repository,
            Arc::new(LocalAddressOrigin),
        )
    }

    pub fn with_origin(
        restaurant_repository: Arc<R>,
        criterion_repository: Arc<C>,
        origin: Arc<dyn OriginResolver>,
    ) -> Self {
        Self {
            restaurant_repository,
            criterion_repository,
            origin,
        }
    }

    /// Records a like (`true`) or dislike (`false`) stamped with the current time.
    ///
    /// The submitter origin is best effort: when it cannot be determined the
    /// vote is stored with the `"unavailable"` placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the restaurant does not exist.
    pub async fn add_vote(&self, restaurant_id: i64, liked: bool) -> Result<Vote, AppError> {
        let mut restaurant = self.require_restaurant(restaurant_id).await?;

        let origin = resolve_or_unavailable(self.origin.as_ref());
        restaurant.add_evaluation(Vote::new(liked, origin, Utc::now()));

        let saved = self.restaurant_repository.save(restaurant).await?;
        let vote = saved
            .last_evaluation()
            .and_then(Evaluation::as_vote)
            .cloned()
            .ok_or_else(|| missing_after_save(restaurant_id))?;

        tracing::info!(restaurant_id, vote_id = ?vote.id, liked, "Vote recorded");
        Ok(vote)
    }

    /// Records a review graded on catalog criteria.
    ///
    /// `grades` maps criterion names (matched case-insensitively) to scores.
    /// Every entry is checked before anything is written: a single bad entry
    /// rejects the whole review.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the restaurant does not exist.
    /// Returns [`AppError::InvalidGrade`] if a score lies outside `1..=5`.
    /// Returns [`AppError::UnknownCriterion`] if a name is not in the catalog.
    /// Returns [`AppError::Validation`] if the username is blank or a criterion
    /// is graded twice.
    pub async fn add_review<I, S>(
        &self,
        restaurant_id: i64,
        username: String,
        comment: String,
        grades: I,
    ) -> Result<Review, AppError>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let entries: Vec<(String, Score)> = grades
            .into_iter()
            .map(|(name, value)| -> Result<(String, Score), AppError> {
                let name = name.into();
                let score = Score::try_from(value).inspect_err(|_| {
                    tracing::warn!(restaurant_id, criterion = %name, value, "Grade out of range");
                })?;
                Ok((name, score))
            })
            .collect::<Result<_, AppError>>()?;

        let form = ReviewForm {
            username: username.trim().to_string(),
        };
        form.validate()?;

        let mut restaurant = self.require_restaurant(restaurant_id).await?;

        let mut review = Review::new(form.username, comment.trim(), Utc::now());
        for (name, score) in entries {
            let criterion = self
                .criterion_repository
                .find_by_exact_name(&name)
                .await?
                .ok_or_else(|| {
                    tracing::warn!(restaurant_id, criterion = %name, "Unknown criterion");
                    AppError::unknown_criterion(
                        "Criterion not found",
                        json!({ "criterion": name }),
                    )
                })?;

            review.add_grade(Grade::new(criterion, score))?;
        }

        restaurant.add_evaluation(review);

        let saved = self.restaurant_repository.save(restaurant).await?;
        let review = saved
            .last_evaluation()
            .and_then(Evaluation::as_review)
            .cloned()
            .ok_or_else(|| missing_after_save(restaurant_id))?;

        tracing::info!(
            restaurant_id,
            review_id = ?review.id,
            grades = review.grades().len(),
            "Review recorded"
        );
        Ok(review)
    }

    pub async fn count_likes(&self, restaurant_id: i64) -> Result<usize, AppError> {
        self.read(restaurant_id, |r| statistics::count_votes(r, true), 0)
            .await
    }

    pub async fn count_dislikes(&self, restaurant_id: i64) -> Result<usize, AppError> {
        self.read(restaurant_id, |r| statistics::count_votes(r, false), 0)
            .await
    }

    /// Number of reviews.
    pub async fn count_complete_evaluations(&self, restaurant_id: i64) -> Result<usize, AppError> {
        self.read(restaurant_id, statistics::count_reviews, 0).await
    }

    pub async fn count_total_evaluations(&self, restaurant_id: i64) -> Result<usize, AppError> {
        self.read(restaurant_id, statistics::count_total_evaluations, 0)
            .await
    }

    /// Mean grade on one criterion, `0.0` when there are no such grades.
    ///
    /// `0.0` never occurs as a real average (scores start at 1). Use
    /// [`Self::criterion_has_grades`] to tell the cases apart explicitly.
    pub async fn average_grade_for_criterion(
        &self,
        restaurant_id: i64,
        criterion_name: &str,
    ) -> Result<f64, AppError> {
        self.read(
            restaurant_id,
            |r| statistics::average_grade(r, criterion_name).unwrap_or(0.0),
            0.0,
        )
        .await
    }

    /// Mean of every grade of every review, `0.0` when there are none.
    pub async fn overall_average(&self, restaurant_id: i64) -> Result<f64, AppError> {
        self.read(
            restaurant_id,
            |r| statistics::overall_average(r).unwrap_or(0.0),
            0.0,
        )
        .await
    }

    pub async fn criterion_has_grades(
        &self,
        restaurant_id: i64,
        criterion_name: &str,
    ) -> Result<bool, AppError> {
        self.read(
            restaurant_id,
            |r| statistics::has_grades_for(r, criterion_name),
            false,
        )
        .await
    }

    pub async fn has_evaluations(&self, restaurant_id: i64) -> Result<bool, AppError> {
        self.read(restaurant_id, Restaurant::has_evaluations, false)
            .await
    }

    pub async fn list_reviews(&self, restaurant_id: i64) -> Result<Vec<Review>, AppError> {
        self.read(
            restaurant_id,
            |r| r.reviews().cloned().collect(),
            Vec::new(),
        )
        .await
    }

    /// Every statistic at once, for display.
    pub async fn summary(&self, restaurant_id: i64) -> Result<RatingSummary, AppError> {
        self.read(restaurant_id, RatingSummary::of, RatingSummary::default())
            .await
    }

    async fn require_restaurant(&self, restaurant_id: i64) -> Result<Restaurant, AppError> {
        self.restaurant_repository
            .find_by_id(restaurant_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Restaurant not found", json!({ "id": restaurant_id }))
            })
    }

    /// Applies `derive` to the loaded restaurant, or returns `absent` if there is none.
    async fn read<T>(
        &self,
        restaurant_id: i64,
        derive: impl FnOnce(&Restaurant) -> T,
        absent: T,
    ) -> Result<T, AppError> {
        match self.restaurant_repository.find_by_id(restaurant_id).await? {
            Some(restaurant) => Ok(derive(&restaurant)),
            None => {
                tracing::debug!(restaurant_id, "Restaurant not found, returning empty result");
                Ok(absent)
            }
        }
    }
}

fn missing_after_save(restaurant_id: i64) -> AppError {
    AppError::Storage(sqlx::Error::Protocol(format!(
        "saved restaurant {restaurant_id} lost its new evaluation"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Address, City, Criterion, RestaurantType};
    use crate::domain::repositories::{MockCriterionRepository, MockRestaurantRepository};
    use crate::infrastructure::origin::UNAVAILABLE_ORIGIN;

    fn restaurant(id: i64) -> Restaurant {
        let mut city = City::new("2000", "Neuchâtel");
        city.id = Some(1);
        let mut kind = RestaurantType::new("Pizzeria", None);
        kind.id = Some(1);

        let mut restaurant = Restaurant::new(
            "Chez Mario",
            None,
            None,
            Address::new("Rue du Seyon 1", city),
            kind,
        );
        restaurant.set_id(id);
        restaurant
    }

    fn catalog(name: &str) -> Option<Criterion> {
        let id = match name.to_lowercase().as_str() {
            "service" => 1,
            "cuisine" => 2,
            "cadre" => 3,
            _ => return None,
        };
        let mut criterion = Criterion::new(name, None);
        criterion.id = Some(id);
        Some(criterion)
    }

    /// Assigns ids to new evaluations, the way the database does.
    fn save_assigning_ids(mut restaurant: Restaurant) -> Result<Restaurant, AppError> {
        for (index, evaluation) in restaurant.evaluations_mut().iter_mut().enumerate() {
            if evaluation.id().is_none() {
                evaluation.set_id(100 + index as i64);
            }
        }
        Ok(restaurant)
    }

    fn service(
        restaurants: MockRestaurantRepository,
        criteria: MockCriterionRepository,
    ) -> EvaluationService<MockRestaurantRepository, MockCriterionRepository> {
        EvaluationService::with_origin(
            Arc::new(restaurants),
            Arc::new(criteria),
            Arc::new(|| Some("192.168.1.20".to_string())),
        )
    }

    #[tokio::test]
    async fn test_add_vote() {
        let mut restaurants = MockRestaurantRepository::new();
        restaurants
            .expect_find_by_id()
            .returning(|id| Ok(Some(restaurant(id))));
        restaurants
            .expect_save()
            .withf(|r| r.votes().count() == 1)
            .times(1)
            .returning(save_assigning_ids);

        let service = service(restaurants, MockCriterionRepository::new());

        let vote = service.add_vote(1, true).await.unwrap();

        assert!(vote.liked);
        assert_eq!(vote.id, Some(100));
        assert_eq!(vote.restaurant_id, Some(1));
        assert_eq!(vote.origin, "192.168.1.20");
    }

    #[tokio::test]
    async fn test_add_vote_degrades_origin() {
        let mut restaurants = MockRestaurantRepository::new();
        restaurants
            .expect_find_by_id()
            .returning(|id| Ok(Some(restaurant(id))));
        restaurants.expect_save().returning(save_assigning_ids);

        let service = EvaluationService::with_origin(
            Arc::new(restaurants),
            Arc::new(MockCriterionRepository::new()),
            Arc::new(|| None::<String>),
        );

        let vote = service.add_vote(1, false).await.unwrap();

        assert!(!vote.liked);
        assert_eq!(vote.origin, UNAVAILABLE_ORIGIN);
    }

    #[tokio::test]
    async fn test_add_vote_to_missing_restaurant() {
        let mut restaurants = MockRestaurantRepository::new();
        restaurants.expect_find_by_id().returning(|_| Ok(None));
        restaurants.expect_save().times(0);

        let service = service(restaurants, MockCriterionRepository::new());

        let result = service.add_vote(9, true).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_add_review() {
        let mut restaurants = MockRestaurantRepository::new();
        let mut criteria = MockCriterionRepository::new();

        restaurants
            .expect_find_by_id()
            .returning(|id| Ok(Some(restaurant(id))));
        criteria
            .expect_find_by_exact_name()
            .times(2)
            .returning(|name| Ok(catalog(name)));
        restaurants
            .expect_save()
            .times(1)
            .returning(save_assigning_ids);

        let service = service(restaurants, criteria);

        let review = service
            .add_review(
                1,
                "alice".to_string(),
                "Excellent".to_string(),
                [("Service", 5), ("cuisine", 4)],
            )
            .await
            .unwrap();

        assert_eq!(review.id, Some(100));
        assert_eq!(review.username, "alice");
        assert_eq!(review.grades().len(), 2);
        assert!(review.grades().iter().all(|g| g.review_id == Some(100)));
        assert_eq!(review.grade_for("Cuisine").map(|g| g.score.value()), Some(4));
    }

    #[tokio::test]
    async fn test_add_review_with_out_of_range_score_stores_nothing() {
        let mut restaurants = MockRestaurantRepository::new();
        let mut criteria = MockCriterionRepository::new();

        restaurants.expect_find_by_id().times(0);
        criteria.expect_find_by_exact_name().times(0);
        restaurants.expect_save().times(0);

        let service = service(restaurants, criteria);

        let result = service
            .add_review(
                1,
                "bob".to_string(),
                String::new(),
                [("Service", 5), ("Cuisine", 7)],
            )
            .await;

        assert!(matches!(result, Err(AppError::InvalidGrade { .. })));
    }

    #[tokio::test]
    async fn test_add_review_with_unknown_criterion_stores_nothing() {
        let mut restaurants = MockRestaurantRepository::new();
        let mut criteria = MockCriterionRepository::new();

        restaurants
            .expect_find_by_id()
            .returning(|id| Ok(Some(restaurant(id))));
        criteria
            .expect_find_by_exact_name()
            .returning(|name| Ok(catalog(name)));
        restaurants.expect_save().times(0);

        let service = service(restaurants, criteria);

        let result = service
            .add_review(
                1,
                "carol".to_string(),
                String::new(),
                [("Service", 3), ("Parking", 2)],
            )
            .await;

        assert!(matches!(result, Err(AppError::UnknownCriterion { .. })));
    }

    #[tokio::test]
    async fn test_add_review_rejects_duplicate_criterion_across_case() {
        let mut restaurants = MockRestaurantRepository::new();
        let mut criteria = MockCriterionRepository::new();

        restaurants
            .expect_find_by_id()
            .returning(|id| Ok(Some(restaurant(id))));
        criteria
            .expect_find_by_exact_name()
            .returning(|name| Ok(catalog(name)));
        restaurants.expect_save().times(0);

        let service = service(restaurants, criteria);

        let result = service
            .add_review(
                1,
                "dave".to_string(),
                String::new(),
                [("Service", 3), ("SERVICE", 4)],
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_add_review_requires_username() {
        let mut restaurants = MockRestaurantRepository::new();
        restaurants.expect_find_by_id().times(0);
        restaurants.expect_save().times(0);

        let service = service(restaurants, MockCriterionRepository::new());

        let result = service
            .add_review(1, "  ".to_string(), String::new(), Vec::<(String, i64)>::new())
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_read_side_on_missing_restaurant_is_empty() {
        let mut restaurants = MockRestaurantRepository::new();
        restaurants.expect_find_by_id().returning(|_| Ok(None));

        let service = service(restaurants, MockCriterionRepository::new());

        assert_eq!(service.count_likes(404).await.unwrap(), 0);
        assert_eq!(service.count_total_evaluations(404).await.unwrap(), 0);
        assert_eq!(
            service
                .average_grade_for_criterion(404, "Service")
                .await
                .unwrap(),
            0.0
        );
        assert_eq!(service.overall_average(404).await.unwrap(), 0.0);
        assert!(service.list_reviews(404).await.unwrap().is_empty());
        assert!(!service.has_evaluations(404).await.unwrap());
        assert_eq!(service.summary(404).await.unwrap(), RatingSummary::default());
    }

    #[tokio::test]
    async fn test_read_side_statistics() {
        let mut restaurants = MockRestaurantRepository::new();
        restaurants.expect_find_by_id().returning(|id| {
            let mut r = restaurant(id);
            r.add_evaluation(Vote::new(true, "a", Utc::now()));
            r.add_evaluation(Vote::new(true, "b", Utc::now()));
            r.add_evaluation(Vote::new(false, "c", Utc::now()));

            let mut review = Review::new("alice", "", Utc::now());
            for (name, value) in [("Service", 5), ("Cuisine", 4)] {
                let criterion = catalog(name).unwrap();
                review
                    .add_grade(Grade::new(criterion, Score::try_from(value).unwrap()))
                    .unwrap();
            }
            r.add_evaluation(review);
            Ok(Some(r))
        });

        let service = service(restaurants, MockCriterionRepository::new());

        assert_eq!(service.count_likes(1).await.unwrap(), 2);
        assert_eq!(service.count_dislikes(1).await.unwrap(), 1);
        assert_eq!(service.count_complete_evaluations(1).await.unwrap(), 1);
        assert_eq!(service.count_total_evaluations(1).await.unwrap(), 4);
        assert_eq!(
            service
                .average_grade_for_criterion(1, "service")
                .await
                .unwrap(),
            5.0
        );
        assert_eq!(service.overall_average(1).await.unwrap(), 4.5);
        assert!(service.criterion_has_grades(1, "Cuisine").await.unwrap());
        assert!(!service.criterion_has_grades(1, "Cadre").await.unwrap());
        assert_eq!(
            service
                .average_grade_for_criterion(1, "Cadre")
                .await
                .unwrap(),
            0.0
        );
        assert_eq!(service.list_reviews(1).await.unwrap().len(), 1);
    }
}

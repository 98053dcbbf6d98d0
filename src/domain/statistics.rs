//! Rating statistics derived from a loaded restaurant.
//!
//! Pure functions over [`Restaurant::evaluations`]: no I/O, no ordering
//! assumptions. Averages are computed over the full set of grades.
//!
//! Averages return `None` when there is nothing to average. Callers that need
//! a plain `0.0` for "no data" apply `unwrap_or(0.0)` explicitly.

use std::collections::BTreeMap;

use crate::domain::entities::{Grade, Restaurant};

/// Counts votes whose flag equals `liked`.
pub fn count_votes(restaurant: &Restaurant, liked: bool) -> usize {
    restaurant.votes().filter(|vote| vote.liked == liked).count()
}

pub fn count_reviews(restaurant: &Restaurant) -> usize {
    restaurant.reviews().count()
}

/// Votes plus reviews.
pub fn count_total_evaluations(restaurant: &Restaurant) -> usize {
    restaurant.evaluations().len()
}

fn all_grades(restaurant: &Restaurant) -> impl Iterator<Item = &Grade> {
    restaurant.reviews().flat_map(|review| review.grades())
}

fn mean<'a>(grades: impl Iterator<Item = &'a Grade>) -> Option<f64> {
    let (sum, count) = grades.fold((0u64, 0u64), |(sum, count), grade| {
        (sum + u64::from(grade.score.value()), count + 1)
    });

    (count > 0).then(|| sum as f64 / count as f64)
}

/// Mean of every grade given on the named criterion (case-insensitive).
pub fn average_grade(restaurant: &Restaurant, criterion_name: &str) -> Option<f64> {
    mean(all_grades(restaurant).filter(|grade| grade.criterion.is_named(criterion_name)))
}

/// Mean of all grades of all criteria, flattened. Not a mean of per-criterion means.
pub fn overall_average(restaurant: &Restaurant) -> Option<f64> {
    mean(all_grades(restaurant))
}

/// True when at least one grade exists for the named criterion.
pub fn has_grades_for(restaurant: &Restaurant, criterion_name: &str) -> bool {
    all_grades(restaurant).any(|grade| grade.criterion.is_named(criterion_name))
}

/// Per-criterion averages keyed by criterion name, for criteria that have grades.
pub fn averages_by_criterion(restaurant: &Restaurant) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<String, (u64, u64)> = BTreeMap::new();

    for grade in all_grades(restaurant) {
        let entry = totals.entry(grade.criterion.name.clone()).or_default();
        entry.0 += u64::from(grade.score.value());
        entry.1 += 1;
    }

    totals
        .into_iter()
        .map(|(name, (sum, count))| (name, sum as f64 / count as f64))
        .collect()
}

/// Snapshot of every statistic shown for a restaurant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RatingSummary {
    pub likes: usize,
    pub dislikes: usize,
    pub reviews: usize,
    pub total: usize,
    pub overall_average: Option<f64>,
    pub criterion_averages: BTreeMap<String, f64>,
}

impl RatingSummary {
    pub fn of(restaurant: &Restaurant) -> Self {
        Self {
            likes: count_votes(restaurant, true),
            dislikes: count_votes(restaurant, false),
            reviews: count_reviews(restaurant),
            total: count_total_evaluations(restaurant),
            overall_average: overall_average(restaurant),
            criterion_averages: averages_by_criterion(restaurant),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        Address, City, Criterion, Grade, Restaurant, RestaurantType, Review, Score, Vote,
    };
    use chrono::Utc;

    fn criterion(id: i64, name: &str) -> Criterion {
        Criterion {
            id: Some(id),
            name: name.to_string(),
            description: None,
        }
    }

    fn restaurant() -> Restaurant {
        Restaurant::new(
            "Chez Mario",
            None,
            None,
            Address::new("Rue du Seyon 1", City::new("2000", "Neuchâtel")),
            RestaurantType::new("Pizzeria", None),
        )
    }

    fn review(grades: &[(i64, &str, i64)]) -> Review {
        let mut review = Review::new("tester", "", Utc::now());
        for (id, name, value) in grades {
            review
                .add_grade(Grade::new(
                    criterion(*id, name),
                    Score::try_from(*value).unwrap(),
                ))
                .unwrap();
        }
        review
    }

    #[test]
    fn test_empty_restaurant_has_no_data() {
        let r = restaurant();

        assert_eq!(count_votes(&r, true), 0);
        assert_eq!(count_total_evaluations(&r), 0);
        assert_eq!(average_grade(&r, "Service"), None);
        assert_eq!(overall_average(&r), None);
        assert_eq!(RatingSummary::of(&r), RatingSummary::default());
    }

    #[test]
    fn test_vote_counts() {
        let mut r = restaurant();
        r.add_evaluation(Vote::new(true, "a", Utc::now()));
        r.add_evaluation(Vote::new(true, "b", Utc::now()));
        r.add_evaluation(Vote::new(false, "c", Utc::now()));
        r.add_evaluation(review(&[(1, "Service", 4)]));

        assert_eq!(count_votes(&r, true), 2);
        assert_eq!(count_votes(&r, false), 1);
        assert_eq!(count_reviews(&r), 1);
        assert_eq!(
            count_total_evaluations(&r),
            count_votes(&r, true) + count_votes(&r, false) + count_reviews(&r)
        );
    }

    #[test]
    fn test_overall_average_is_flattened_mean() {
        let mut r = restaurant();
        r.add_evaluation(review(&[(1, "Service", 5), (2, "Cuisine", 1)]));
        r.add_evaluation(review(&[(1, "Service", 5)]));
        r.add_evaluation(review(&[(1, "Service", 5)]));

        assert_eq!(average_grade(&r, "Service"), Some(5.0));
        assert_eq!(average_grade(&r, "Cuisine"), Some(1.0));
        assert_eq!(overall_average(&r), Some(4.0));
    }

    #[test]
    fn test_average_grade_matches_name_case_insensitively() {
        let mut r = restaurant();
        r.add_evaluation(review(&[(1, "Service", 4)]));
        r.add_evaluation(review(&[(1, "Service", 3)]));

        assert_eq!(average_grade(&r, "SERVICE"), Some(3.5));
        assert!(has_grades_for(&r, "service"));
    }

    #[test]
    fn test_unknown_criterion_is_distinguishable_from_a_score() {
        let mut r = restaurant();
        r.add_evaluation(review(&[(1, "Service", 1)]));

        assert_eq!(average_grade(&r, "Unknown").unwrap_or(0.0), 0.0);
        assert!(!has_grades_for(&r, "Unknown"));
        assert!(has_grades_for(&r, "Service"));
    }

    #[test]
    fn test_summary() {
        let mut r = restaurant();
        r.add_evaluation(Vote::new(true, "a", Utc::now()));
        r.add_evaluation(review(&[(1, "Service", 5), (2, "Cuisine", 4)]));

        let summary = RatingSummary::of(&r);

        assert_eq!(summary.likes, 1);
        assert_eq!(summary.dislikes, 0);
        assert_eq!(summary.reviews, 1);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.overall_average, Some(4.5));
        assert_eq!(summary.criterion_averages.get("Service"), Some(&5.0));
        assert_eq!(summary.criterion_averages.get("Cuisine"), Some(&4.0));
    }
}

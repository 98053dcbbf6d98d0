//! Restaurant aggregate root.

use super::city::City;
use super::evaluation::{Evaluation, Review, Vote};
use super::restaurant_type::RestaurantType;

/// Street address embedded in a restaurant. Has no identity of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub city: City,
}

impl Address {
    pub fn new(street: impl Into<String>, city: City) -> Self {
        Self {
            street: street.into(),
            city,
        }
    }
}

/// A restaurant and the evaluations it owns.
///
/// The restaurant is the only path through which evaluations (and their grades)
/// are created, stored or removed. Saving a restaurant rewrites its owned
/// subtree; deleting it removes every evaluation and grade.
#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    /// `None` until the restaurant is first saved.
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub address: Address,
    pub restaurant_type: RestaurantType,
    evaluations: Vec<Evaluation>,
}

impl Restaurant {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        website: Option<String>,
        address: Address,
        restaurant_type: RestaurantType,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description,
            website,
            address,
            restaurant_type,
            evaluations: Vec::new(),
        }
    }

    /// Moves an evaluation into this restaurant and points its back-reference here.
    pub fn add_evaluation(&mut self, evaluation: impl Into<Evaluation>) {
        let mut evaluation = evaluation.into();
        evaluation.set_restaurant_id(self.id);
        self.evaluations.push(evaluation);
    }

    /// Detaches a stored evaluation. It is deleted on the next save.
    pub fn remove_evaluation(&mut self, evaluation_id: i64) -> Option<Evaluation> {
        let position = self
            .evaluations
            .iter()
            .position(|e| e.id() == Some(evaluation_id))?;
        Some(self.evaluations.remove(position))
    }

    pub fn evaluations(&self) -> &[Evaluation] {
        &self.evaluations
    }

    pub fn votes(&self) -> impl Iterator<Item = &Vote> {
        self.evaluations.iter().filter_map(Evaluation::as_vote)
    }

    pub fn reviews(&self) -> impl Iterator<Item = &Review> {
        self.evaluations.iter().filter_map(Evaluation::as_review)
    }

    pub fn has_evaluations(&self) -> bool {
        !self.evaluations.is_empty()
    }

    /// The most recently attached evaluation, i.e. the one a service just added.
    pub fn last_evaluation(&self) -> Option<&Evaluation> {
        self.evaluations.last()
    }

    /// Records the storage id and re-points every owned evaluation at it.
    pub(crate) fn set_id(&mut self, id: i64) {
        self.id = Some(id);
        for evaluation in &mut self.evaluations {
            evaluation.set_restaurant_id(Some(id));
        }
    }

    pub(crate) fn evaluations_mut(&mut self) -> &mut [Evaluation] {
        &mut self.evaluations
    }
}

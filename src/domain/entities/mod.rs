//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`Restaurant`] - Aggregate root owning an [`Address`] and its evaluations
//! - [`Evaluation`] - Sum type over [`Vote`] and [`Review`]
//! - [`Grade`] - One [`Score`] on one [`Criterion`], owned by a review
//! - [`City`], [`RestaurantType`], [`Criterion`] - Shared reference data
//!
//! Unsaved entities carry `id: None`; storage assigns ids on first save.

pub mod city;
pub mod criterion;
pub mod evaluation;
pub mod restaurant;
pub mod restaurant_type;

pub use city::City;
pub use criterion::Criterion;
pub use evaluation::{Evaluation, Grade, MAX_SCORE, MIN_SCORE, Review, Score, Vote};
pub use restaurant::{Address, Restaurant};
pub use restaurant_type::RestaurantType;

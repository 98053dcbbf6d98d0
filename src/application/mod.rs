//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for the console.
//!
//! # Available Services
//!
//! - [`services::restaurant_service::RestaurantService`] - Restaurant creation, editing and lookup
//! - [`services::evaluation_service::EvaluationService`] - Votes, reviews and rating statistics
//! - [`services::catalog_service::CatalogService`] - Cities, restaurant types and criteria

pub mod services;

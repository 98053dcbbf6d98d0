//! Repository trait definitions for the domain layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`RestaurantRepository`] - Restaurant aggregate, evaluations and grades included
//! - [`EvaluationRepository`] - Read-only evaluation and grade lookups
//! - [`CityRepository`] - City reference data
//! - [`RestaurantTypeRepository`] - Restaurant type reference data
//! - [`CriterionRepository`] - Criterion catalog
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod city_repository;
pub mod criterion_repository;
pub mod evaluation_repository;
pub mod restaurant_repository;
pub mod restaurant_type_repository;

pub use city_repository::CityRepository;
pub use criterion_repository::CriterionRepository;
pub use evaluation_repository::EvaluationRepository;
pub use restaurant_repository::RestaurantRepository;
pub use restaurant_type_repository::RestaurantTypeRepository;

#[cfg(test)]
pub use city_repository::MockCityRepository;
#[cfg(test)]
pub use criterion_repository::MockCriterionRepository;
#[cfg(test)]
pub use evaluation_repository::MockEvaluationRepository;
#[cfg(test)]
pub use restaurant_repository::MockRestaurantRepository;
#[cfg(test)]
pub use restaurant_type_repository::MockRestaurantTypeRepository;

//! SQLite repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries and `FromRow` row types.
//!
//! # Repositories
//!
//! - [`SqliteRestaurantRepository`] - Restaurant aggregate storage with cascading writes
//! - [`SqliteEvaluationRepository`] - Read-only evaluation and grade lookups
//! - [`SqliteCityRepository`] - Cities
//! - [`SqliteRestaurantTypeRepository`] - Restaurant types
//! - [`SqliteCriterionRepository`] - Criterion catalog

mod rows;
pub mod sqlite_city_repository;
pub mod sqlite_criterion_repository;
pub mod sqlite_evaluation_repository;
pub mod sqlite_restaurant_repository;
pub mod sqlite_restaurant_type_repository;

pub use sqlite_city_repository::SqliteCityRepository;
pub use sqlite_criterion_repository::SqliteCriterionRepository;
pub use sqlite_evaluation_repository::SqliteEvaluationRepository;
pub use sqlite_restaurant_repository::SqliteRestaurantRepository;
pub use sqlite_restaurant_type_repository::SqliteRestaurantTypeRepository;

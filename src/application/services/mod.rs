//! Business logic services for the application layer.

pub mod catalog_service;
pub mod evaluation_service;
pub mod restaurant_service;

pub use catalog_service::CatalogService;
pub use evaluation_service::EvaluationService;
pub use restaurant_service::RestaurantService;

//! # GuideResto
//!
//! A restaurant catalog with votes, graded reviews and rating statistics,
//! stored in SQLite and driven from an interactive console.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, rating statistics and repository traits
//! - **Application Layer** ([`application`]) - Business logic and service orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite persistence and host lookups
//! - **Console** ([`console`]) - Interactive menu and one-shot subcommands
//!
//! ## Features
//!
//! - Restaurants owning their votes and reviews, saved and deleted as one unit
//! - Reviews graded 1 to 5 on a fixed criterion catalog, all-or-nothing
//! - Like/dislike counts, per-criterion and overall averages
//!
//! ## Quick Start
//!
//! ```bash
//! # Optional, defaults to ./guideresto.db
//! export DATABASE_URL="sqlite://guideresto.db?mode=rwc"
//!
//! # Start the interactive menu (migrations run automatically)
//! cargo run
//!
//! # Or print the catalog as JSON
//! cargo run -- list --json
//! ```
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod config;
pub mod console;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod runtime;
pub mod state;
pub mod utils;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{CatalogService, EvaluationService, RestaurantService};
    pub use crate::domain::entities::{
        Address, City, Criterion, Evaluation, Grade, Restaurant, RestaurantType, Review, Score,
        Vote,
    };
    pub use crate::domain::statistics::RatingSummary;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}

//! Domain layer containing business entities and logic.
//!
//! Defines entities, the statistics engine and repository interfaces,
//! independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Restaurants, evaluations, grades and reference data
//! - [`statistics`] - Pure rating statistics over a loaded restaurant
//! - [`repositories`] - Data access trait definitions
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business rules are enforced in services (see [`crate::application::services`])

pub mod entities;
pub mod repositories;
pub mod statistics;

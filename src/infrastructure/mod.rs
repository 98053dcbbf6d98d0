//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence and host lookups.
//!
//! # Modules
//!
//! - [`database`] - SQLite pool setup and embedded migrations
//! - [`origin`] - Submitter origin resolution for votes
//! - [`persistence`] - SQLite repository implementations

pub mod database;
pub mod origin;
pub mod persistence;

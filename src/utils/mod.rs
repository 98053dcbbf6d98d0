//! Small helpers shared across layers.
//!
//! - [`db_error`] - Classification of database constraint violations
//! - [`text`] - Case-insensitive matching and input normalization

pub mod db_error;
pub mod text;

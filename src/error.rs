//! Application error taxonomy.
//!
//! Every fallible operation in the crate returns [`AppError`]. All variants except
//! [`AppError::Storage`] are caller-recoverable: they describe bad input or a
//! missing record and never leave partial writes behind.

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::utils::db_error::{is_foreign_key_violation, is_unique_violation};

/// Serializable view of an error, used by the console's JSON output.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// The aggregate addressed by id does not exist.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// A required foreign reference (city, type) does not resolve.
    #[error("{message}")]
    ReferenceNotFound { message: String, details: Value },

    /// A grade score outside `1..=5`.
    #[error("{message}")]
    InvalidGrade { message: String, details: Value },

    /// A criterion name that is not in the catalog.
    #[error("{message}")]
    UnknownCriterion { message: String, details: Value },

    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Unique or foreign-key constraint violated by a write.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    #[error("storage failure: {0}")]
    Storage(#[source] sqlx::Error),
}

impl AppError {
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn reference_not_found(message: impl Into<String>, details: Value) -> Self {
        Self::ReferenceNotFound {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_grade(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidGrade {
            message: message.into(),
            details,
        }
    }

    pub fn unknown_criterion(message: impl Into<String>, details: Value) -> Self {
        Self::UnknownCriterion {
            message: message.into(),
            details,
        }
    }

    pub fn validation(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    /// Returns false only for storage failures, which abort the unit of work.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }

    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::ReferenceNotFound { .. } => "reference_not_found",
            Self::InvalidGrade { .. } => "invalid_grade",
            Self::UnknownCriterion { .. } => "unknown_criterion",
            Self::Validation { .. } => "validation_error",
            Self::Conflict { .. } => "conflict",
            Self::Storage(_) => "storage_error",
        }
    }

    pub fn info(&self) -> ErrorInfo {
        let details = match self {
            Self::NotFound { details, .. }
            | Self::ReferenceNotFound { details, .. }
            | Self::InvalidGrade { details, .. }
            | Self::UnknownCriterion { details, .. }
            | Self::Validation { details, .. }
            | Self::Conflict { details, .. } => details.clone(),
            Self::Storage(_) => json!({}),
        };

        ErrorInfo {
            code: self.code(),
            message: self.to_string(),
            details,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if is_unique_violation(&e) {
            let constraint = e
                .as_database_error()
                .and_then(|db| db.constraint().map(str::to_string));
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": constraint }),
            );
        }

        if is_foreign_key_violation(&e) {
            return AppError::conflict(
                "Record is still referenced or references a missing record",
                json!({}),
            );
        }

        AppError::Storage(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::validation("Invalid input", details)
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        AppError::Storage(sqlx::Error::Migrate(Box::new(e)))
    }
}

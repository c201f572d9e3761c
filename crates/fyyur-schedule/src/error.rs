//! Scheduling error types.

use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    /// A show points at a venue or artist that does not exist.
    #[error("data integrity error: {0}")]
    DataIntegrity(String),

    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("failed precondition: {0}")]
    FailedPrecondition(String),

    #[error("invalid submission: {0}")]
    Validation(ValidationErrors),

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ValidationErrors> for ScheduleError {
    fn from(errors: ValidationErrors) -> Self {
        ScheduleError::Validation(errors)
    }
}

impl ScheduleError {
    /// Map a write failure, turning constraint violations into the
    /// recoverable variants.
    pub fn from_write(err: DbErr, duplicate: impl FnOnce() -> String) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => ScheduleError::DuplicateKey(duplicate()),
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                ScheduleError::FailedPrecondition(detail)
            }
            _ => ScheduleError::Database(err),
        }
    }
}

/// One rejected form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every field error found in a submission, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    pub fields: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

use models::{ParseStatusError, ProgressOutOfRange};
use sea_orm::{DbErr, SqlErr};
use std::fmt::Display;
use thiserror::Error;

/// Every failure the storage layer reports to its callers
#[derive(Debug, Error)]
pub enum StoreError {
    /// Input violates a field-level rule; nothing was written
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced id does not resolve to an existing row
    #[error("not found: {0}")]
    NotFound(String),

    /// A uniqueness constraint was violated
    #[error("conflict: {0}")]
    Conflict(String),

    /// The engine could not be reached or a transaction could not commit
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[source] DbErr),
}

impl StoreError {
    pub fn not_found(entity: &str, id: impl Display) -> Self {
        Self::NotFound(format!("{entity} {id}"))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => return Self::Conflict(message),
            Some(SqlErr::ForeignKeyConstraintViolation(message)) => {
                return Self::NotFound(message);
            }
            _ => {}
        }

        match err {
            DbErr::RecordNotFound(message) => Self::NotFound(message),
            DbErr::RecordNotUpdated => Self::NotFound("row vanished before update".to_owned()),
            err if is_check_violation(&err) => Self::Validation(err.to_string()),
            err => Self::StorageUnavailable(err),
        }
    }
}

impl From<ParseStatusError> for StoreError {
    fn from(err: ParseStatusError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<ProgressOutOfRange> for StoreError {
    fn from(err: ProgressOutOfRange) -> Self {
        Self::Validation(err.to_string())
    }
}

/// SQLite and Postgres report CHECK failures as plain execution errors
fn is_check_violation(err: &DbErr) -> bool {
    let message = err.to_string();
    message.contains("CHECK constraint failed") || message.contains("violates check constraint")
}

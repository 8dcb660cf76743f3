use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use models::errors::ModelError;

pub const EMAIL_TAKEN: &str = "email already taken";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl ServiceError {
    pub fn customer_not_found(id: i64) -> Self {
        Self::NotFound(format!("Customer with id [{}] not found", id))
    }

    pub fn email_taken() -> Self { Self::Conflict(EMAIL_TAKEN.into()) }

    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "validation",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::Conflict(_) => "conflict",
            ServiceError::Repository(_) => "repository",
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        ServiceError::Validation(e.to_string())
    }
}

/// Convert a storage error; a unique-index violation means the email is taken.
pub fn db_err(e: DbErr) -> ServiceError {
    if let Some(SqlErr::UniqueConstraintViolation(_)) = e.sql_err() {
        return ServiceError::email_taken();
    }
    ServiceError::Repository(e.to_string())
}

pub mod accounts;
pub mod auth;
pub mod contacts;
pub mod custom_fields;
pub mod leads;
pub mod mac_search;
pub mod transactions;
pub mod users;

use thiserror::Error;

use crate::domain::types::{PhoneNumber, TypeConstraintError};
use crate::repository::errors::RepositoryError;

/// Normalizes a phone number to E.164 when it parses; free-form input is
/// kept as typed, blanks become `None`.
pub(crate) fn normalize_phone(phone: Option<String>) -> Option<String> {
    phone
        .map(|raw| match PhoneNumber::new(raw.as_str()) {
            Ok(normalized) => normalized.into_inner(),
            Err(_) => raw.trim().to_string(),
        })
        .filter(|p| !p.is_empty())
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error(transparent)]
    Repository(RepositoryError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ConstraintViolation(msg) => ServiceError::Conflict(msg),
            RepositoryError::ValidationError(msg) => ServiceError::Validation(msg),
            other => ServiceError::Repository(other),
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

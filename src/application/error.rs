// src/application/error.rs
use crate::domain::errors::{DomainError, FieldErrors};
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("the given data was invalid: {0}")]
    InvalidFields(FieldErrors),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::InvalidFields(fields) => Some(fields),
            _ => None,
        }
    }
}

impl From<FieldErrors> for ApplicationError {
    fn from(errors: FieldErrors) -> Self {
        Self::InvalidFields(errors)
    }
}

/// Store-level failures surface as caller-facing field errors where a field
/// is to blame.
impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::Validation(msg),
            DomainError::InvalidFields(fields) => Self::InvalidFields(fields),
            DomainError::Uniqueness { field } => {
                Self::InvalidFields(FieldErrors::single(field, "has already been taken"))
            }
            DomainError::MissingReference { field } => {
                Self::InvalidFields(FieldErrors::single(field, "refers to a missing record"))
            }
            DomainError::NotFound(msg) => Self::NotFound(msg),
            DomainError::Persistence(msg) => Self::Infrastructure(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniqueness_becomes_slug_field_error() {
        let err = ApplicationError::from(DomainError::Uniqueness { field: "slug" });
        let fields = err.field_errors().expect("field errors");
        assert_eq!(fields.get("slug"), Some("has already been taken"));
    }

    #[test]
    fn missing_reference_becomes_field_error() {
        let err = ApplicationError::from(DomainError::MissingReference {
            field: "category_id",
        });
        assert!(err.field_errors().unwrap().contains("category_id"));
    }

    #[test]
    fn persistence_is_infrastructure() {
        let err = ApplicationError::from(DomainError::Persistence("boom".into()));
        assert!(matches!(err, ApplicationError::Infrastructure(_)));
    }
}

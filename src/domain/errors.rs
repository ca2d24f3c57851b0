// src/domain/errors.rs
use serde::Serialize;
use std::{collections::BTreeMap, fmt};
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("invalid fields: {0}")]
    InvalidFields(FieldErrors),
    #[error("{field} has already been taken")]
    Uniqueness { field: &'static str },
    #[error("referenced {field} does not exist")]
    MissingReference { field: &'static str },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("persistence error: {0}")]
    Persistence(String),
}

/// Field name to message map returned for rejected writes.
///
/// Only the first message recorded for a field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Keeps the value on success; records the message under `field` otherwise.
    pub fn capture<T>(&mut self, field: &str, result: DomainResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(DomainError::Validation(message)) => {
                self.insert(field, message);
                None
            }
            Err(DomainError::InvalidFields(nested)) => {
                for (key, message) in nested.0 {
                    self.insert(format!("{field}.{key}"), message);
                }
                None
            }
            Err(other) => {
                self.insert(field, other.to_string());
                None
            }
        }
    }

    /// Like [`capture`](Self::capture) for fields a patch may leave out.
    pub fn capture_some<T>(&mut self, field: &str, result: Option<DomainResult<T>>) -> Option<T> {
        result.and_then(|result| self.capture(field, result))
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl From<FieldErrors> for DomainError {
    fn from(errors: FieldErrors) -> Self {
        DomainError::InvalidFields(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_records_first_message_only() {
        let mut errors = FieldErrors::new();
        let first: Option<()> =
            errors.capture("name", Err(DomainError::Validation("is required".into())));
        let second: Option<()> =
            errors.capture("name", Err(DomainError::Validation("too long".into())));
        assert!(first.is_none() && second.is_none());
        assert_eq!(errors.get("name"), Some("is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn capture_prefixes_nested_fields() {
        let mut errors = FieldErrors::new();
        let nested = FieldErrors::single("url", "is invalid");
        let _: Option<()> = errors.capture("social_links.0", Err(nested.into()));
        assert_eq!(errors.get("social_links.0.url"), Some("is invalid"));
    }

    #[test]
    fn display_joins_fields() {
        let mut errors = FieldErrors::new();
        errors.insert("slug", "has already been taken");
        errors.insert("name", "is required");
        assert_eq!(
            errors.to_string(),
            "name: is required, slug: has already been taken"
        );
    }
}
